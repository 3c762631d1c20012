//! Registry HTTP application wiring.
//!
//! # Purpose
//! Builds the axum router, configures middleware, and defines the shared
//! application state injected into handlers.
//!
//! # Notes
//! This module centralizes route composition to keep `main` small and
//! testable; integration tests drive `build_router` directly.
use crate::api;
use crate::api::openapi::ApiDoc;
use crate::catalog::RemoteSeed;
use crate::context;
use crate::store::{CanaryFlagStore, TelemetryBuffer};
use axum::http::{HeaderValue, Method};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    /// Immutable remote catalog, fixed at startup.
    pub catalog: Arc<Vec<RemoteSeed>>,
    pub canary_flags: CanaryFlagStore,
    pub telemetry: TelemetryBuffer,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub cors_allowed_origins: Vec<String>,
}

pub fn build_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "skipping unparsable CORS origin");
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/login", axum::routing::post(api::auth::login))
        .route("/api/registry", axum::routing::get(api::registry::get_registry))
        .route(
            "/api/registry/admin/routes",
            axum::routing::get(api::registry::get_admin_routes),
        )
        .route(
            "/api/registry/admin/canary-flags",
            axum::routing::get(api::registry::list_canary_flags),
        )
        .route(
            "/api/registry/admin/canary-flags/:remote_id",
            axum::routing::put(api::registry::update_canary_flag),
        )
        .route("/api/registry/health", axum::routing::get(api::registry::health))
        .route("/api/telemetry", axum::routing::post(api::telemetry::collect))
        .route(
            "/api/admin/telemetry",
            axum::routing::get(api::telemetry::list_telemetry),
        )
        .merge(
            utoipa_swagger_ui::SwaggerUi::new("/docs").url("/api/openapi.json", ApiDoc::openapi()),
        )
        .layer(axum::middleware::from_fn(context::propagate_context))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
