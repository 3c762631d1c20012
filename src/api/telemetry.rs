//! Telemetry ingestion and admin listing.
//!
//! # Purpose
//! Accepts client-reported events into the bounded buffer and serves the
//! admin snapshot. Ingestion must stay available to unauthenticated or
//! misconfigured clients, so user-identity resolution is the one place an
//! authentication failure is downgraded to a default instead of surfaced.
use crate::api::error::ApiError;
use crate::api::types::{TelemetryAccepted, TelemetryEventRequest};
use crate::app::AppState;
use crate::auth::guard::{authenticate, require_role, ADMIN_ROLE};
use crate::context::{non_blank_header, RequestContext, USER_ID_HEADER};
use crate::model::TelemetryRecord;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::{Extension, Json};
use chrono::{SecondsFormat, Utc};

const ANONYMOUS_USER: &str = "anonymous";
const DEFAULT_EVENT_TYPE: &str = "unknown_event";
const DEFAULT_LEVEL: &str = "INFO";

#[utoipa::path(
    post,
    path = "/api/telemetry",
    tag = "telemetry",
    request_body = TelemetryEventRequest,
    responses((status = 200, description = "Event accepted", body = TelemetryAccepted))
)]
pub(crate) async fn collect(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
    Json(body): Json<TelemetryEventRequest>,
) -> Json<TelemetryAccepted> {
    let user_id = resolve_user(&headers, &state.jwt_secret);

    let record = TelemetryRecord {
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        correlation_id: ctx.correlation_id.clone(),
        request_id: ctx.request_id.clone(),
        session_id: ctx.session_id.clone(),
        user_id,
        event_type: non_blank(body.event_type, DEFAULT_EVENT_TYPE),
        remote_id: body.remote_id,
        route_id: body.route_id,
        level: non_blank(body.level, DEFAULT_LEVEL),
        duration_ms: body.duration_ms,
        message: body.message,
        metadata: body.metadata,
    };

    tracing::info!(
        event = "telemetry_received",
        event_type = %record.event_type,
        remote_id = record.remote_id.as_deref().unwrap_or(""),
        route_id = record.route_id.as_deref().unwrap_or(""),
        duration_ms = record.duration_ms.unwrap_or(0),
        correlation_id = %record.correlation_id,
        request_id = %record.request_id,
        session_id = %record.session_id,
        user_id = %record.user_id,
    );
    state.telemetry.append(record).await;

    Json(TelemetryAccepted {
        status: "accepted".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/api/admin/telemetry",
    tag = "telemetry",
    responses(
        (status = 200, description = "Buffer snapshot, newest first", body = [TelemetryRecord]),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "ADMIN role required")
    )
)]
pub(crate) async fn list_telemetry(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<TelemetryRecord>>, ApiError> {
    require_role(&headers, &state.jwt_secret, ADMIN_ROLE)?;
    Ok(Json(state.telemetry.snapshot().await))
}

/// Resolution order: explicit user header, then the credential subject on
/// a best-effort basis, then "anonymous". Authentication failures are
/// deliberately swallowed here.
fn resolve_user(headers: &HeaderMap, secret: &str) -> String {
    if let Some(user_id) = non_blank_header(headers, USER_ID_HEADER) {
        return user_id;
    }
    match authenticate(headers, secret) {
        Ok(claims) => claims.sub,
        Err(_) => ANONYMOUS_USER.to_string(),
    }
}

fn non_blank(value: Option<String>, fallback: &str) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::issue_token;
    use axum::http::header::AUTHORIZATION;
    use axum::http::HeaderValue;
    use std::time::Duration;

    const SECRET: &str = "telemetry-test-secret-0123456789";

    #[test]
    fn explicit_user_header_wins_over_credential() {
        let token = issue_token(SECRET, "alice", &["USER".into()], Duration::from_secs(60))
            .expect("issue");
        let mut headers = HeaderMap::new();
        headers.insert(USER_ID_HEADER, HeaderValue::from_static("bob"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
        );
        assert_eq!(resolve_user(&headers, SECRET), "bob");
    }

    #[test]
    fn credential_subject_is_used_without_user_header() {
        let token = issue_token(SECRET, "alice", &["USER".into()], Duration::from_secs(60))
            .expect("issue");
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).expect("header"),
        );
        assert_eq!(resolve_user(&headers, SECRET), "alice");
    }

    #[test]
    fn invalid_credential_falls_back_to_anonymous() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer junk"));
        assert_eq!(resolve_user(&headers, SECRET), "anonymous");
    }

    #[test]
    fn absent_identity_is_anonymous() {
        assert_eq!(resolve_user(&HeaderMap::new(), SECRET), "anonymous");
    }

    #[test]
    fn blank_fields_take_defaults() {
        assert_eq!(non_blank(None, DEFAULT_EVENT_TYPE), "unknown_event");
        assert_eq!(non_blank(Some("  ".to_string()), DEFAULT_LEVEL), "INFO");
        assert_eq!(non_blank(Some("route_error".to_string()), DEFAULT_EVENT_TYPE), "route_error");
    }
}
