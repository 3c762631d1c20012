//! OpenAPI schema aggregation for the registry API.
//!
//! # Purpose
//! Collects all routes and schema types into a single OpenAPI document for
//! docs and client generation.
use crate::api::types::{
    ErrorResponse, HealthStatus, LoginRequest, LoginResponse, TelemetryAccepted,
    TelemetryEventRequest, UpdateCanaryFlagRequest,
};
use crate::api::{auth, registry, telemetry};
use crate::model::{
    CanaryFlag, RegistryDocument, RemoteConfig, RemoteVersion, RolloutConfig, RouteConfig,
    TelemetryRecord,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "mfe-registry",
        version = "v1",
        description = "Micro-frontend registry control plane HTTP API"
    ),
    paths(
        auth::login,
        registry::get_registry,
        registry::get_admin_routes,
        registry::list_canary_flags,
        registry::update_canary_flag,
        registry::health,
        telemetry::collect,
        telemetry::list_telemetry
    ),
    components(schemas(
        ErrorResponse,
        LoginRequest,
        LoginResponse,
        HealthStatus,
        UpdateCanaryFlagRequest,
        CanaryFlag,
        RegistryDocument,
        RouteConfig,
        RemoteConfig,
        RemoteVersion,
        RolloutConfig,
        TelemetryEventRequest,
        TelemetryAccepted,
        TelemetryRecord
    )),
    tags(
        (name = "auth", description = "Token issuance"),
        (name = "registry", description = "Remote catalog and canary rollout"),
        (name = "telemetry", description = "Client telemetry intake"),
        (name = "system", description = "Health probes")
    )
)]
pub struct ApiDoc;
