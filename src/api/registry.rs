//! Registry and canary flag handlers.
//!
//! # Purpose
//! Serves the public registry document, the admin-gated flag listing and
//! update, and the health probe. The document is assembled fresh on every
//! read: each route pairs its catalog seed with the flag state at that
//! instant, with no snapshot isolation across remotes.
use crate::api::error::{api_validation_error, ApiError};
use crate::api::types::{HealthStatus, UpdateCanaryFlagRequest};
use crate::app::AppState;
use crate::auth::guard::{require_role, ADMIN_ROLE};
use crate::catalog::PLATFORM_NAME;
use crate::context::RequestContext;
use crate::model::{CanaryFlag, RegistryDocument};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::{Extension, Json};

async fn build_registry(state: &AppState) -> RegistryDocument {
    let mut routes = Vec::with_capacity(state.catalog.len());
    for seed in state.catalog.iter() {
        let flag = state.canary_flags.get(&seed.id).await;
        routes.push(seed.route_config(&flag));
    }
    RegistryDocument {
        platform: PLATFORM_NAME.to_string(),
        routes,
    }
}

#[utoipa::path(
    get,
    path = "/api/registry",
    tag = "registry",
    responses((status = 200, description = "Registry document", body = RegistryDocument))
)]
pub(crate) async fn get_registry(State(state): State<AppState>) -> Json<RegistryDocument> {
    Json(build_registry(&state).await)
}

#[utoipa::path(
    get,
    path = "/api/registry/admin/routes",
    tag = "registry",
    responses(
        (status = 200, description = "Registry document", body = RegistryDocument),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "ADMIN role required")
    )
)]
/// Same document as the public registry; the gate exists so authenticated
/// admin tooling has a probe endpoint, not to hide different data.
pub(crate) async fn get_admin_routes(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RegistryDocument>, ApiError> {
    require_role(&headers, &state.jwt_secret, ADMIN_ROLE)?;
    Ok(Json(build_registry(&state).await))
}

#[utoipa::path(
    get,
    path = "/api/registry/admin/canary-flags",
    tag = "registry",
    responses(
        (status = 200, description = "One flag per catalog entry", body = [CanaryFlag]),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "ADMIN role required")
    )
)]
pub(crate) async fn list_canary_flags(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CanaryFlag>>, ApiError> {
    require_role(&headers, &state.jwt_secret, ADMIN_ROLE)?;
    Ok(Json(state.canary_flags.list_all().await))
}

#[utoipa::path(
    put,
    path = "/api/registry/admin/canary-flags/{remote_id}",
    tag = "registry",
    params(("remote_id" = String, Path, description = "Catalog remote identifier")),
    request_body = UpdateCanaryFlagRequest,
    responses(
        (status = 200, description = "Updated flag", body = CanaryFlag),
        (status = 400, description = "Missing fields or percentage out of range"),
        (status = 404, description = "Unknown remote"),
        (status = 401, description = "Missing or invalid credential"),
        (status = 403, description = "ADMIN role required")
    )
)]
pub(crate) async fn update_canary_flag(
    Path(remote_id): Path<String>,
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    headers: HeaderMap,
    Json(body): Json<UpdateCanaryFlagRequest>,
) -> Result<Json<CanaryFlag>, ApiError> {
    require_role(&headers, &state.jwt_secret, ADMIN_ROLE)?;

    let (enabled, percentage) = match (body.enabled, body.rollout_percentage) {
        (Some(enabled), Some(percentage)) => (enabled, percentage),
        _ => return Err(api_validation_error("enabled and rolloutPercentage are required")),
    };

    let updated = state.canary_flags.upsert(&remote_id, enabled, percentage).await?;
    tracing::info!(
        event = "canary_flag_updated",
        remote_id = %updated.remote_id,
        enabled = updated.enabled,
        rollout_percentage = updated.rollout_percentage,
        correlation_id = %ctx.correlation_id,
        request_id = %ctx.request_id,
        session_id = %ctx.session_id,
    );
    Ok(Json(updated))
}

#[utoipa::path(
    get,
    path = "/api/registry/health",
    tag = "system",
    responses((status = 200, description = "Service up", body = HealthStatus))
)]
pub(crate) async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "UP".to_string(),
    })
}
