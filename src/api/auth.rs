//! Login endpoint handler.
//!
//! # Purpose
//! Issues access tokens. The username alone determines the role set:
//! "admin" (case-insensitive) receives ADMIN and USER, everyone else USER.
use crate::api::error::{api_internal, api_validation_error, ApiError};
use crate::api::types::{LoginRequest, LoginResponse};
use crate::app::AppState;
use crate::auth::guard::{ADMIN_ROLE, USER_ROLE};
use crate::auth::token::issue_token;
use crate::context::RequestContext;
use axum::extract::State;
use axum::{Extension, Json};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Missing username", body = crate::api::types::ErrorResponse)
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let username = body
        .username
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| api_validation_error("username is required"))?;

    let roles: Vec<String> = if username.eq_ignore_ascii_case("admin") {
        vec![ADMIN_ROLE.to_string(), USER_ROLE.to_string()]
    } else {
        vec![USER_ROLE.to_string()]
    };

    let token = issue_token(&state.jwt_secret, username, &roles, state.token_ttl)
        .map_err(|err| {
            tracing::error!(error = %err, "token issuance failed");
            api_internal("failed to issue token")
        })?;
    metrics::counter!("mfe_auth_tokens_issued_total").increment(1);
    tracing::info!(
        event = "auth_login_issued",
        username = %username,
        roles = %roles.join(","),
        correlation_id = %ctx.correlation_id,
        request_id = %ctx.request_id,
        session_id = %ctx.session_id,
    );

    Ok(Json(LoginResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in_seconds: state.token_ttl.as_secs(),
        roles,
    }))
}
