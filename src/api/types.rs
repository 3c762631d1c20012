//! HTTP API request/response types.
//!
//! # Purpose
//! Defines the payload shapes for the registry REST API and OpenAPI schema
//! generation. Wire names are camelCase to match what the shell consumes.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Clone)]
pub struct LoginRequest {
    pub username: Option<String>,
    /// Accepted but not checked: this is a demo credential flow where the
    /// username alone determines the role set.
    pub password: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in_seconds: u64,
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCanaryFlagRequest {
    pub enabled: Option<bool>,
    pub rollout_percentage: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryEventRequest {
    pub event_type: Option<String>,
    pub remote_id: Option<String>,
    pub route_id: Option<String>,
    pub level: Option<String>,
    pub duration_ms: Option<u64>,
    pub message: Option<String>,
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct TelemetryAccepted {
    pub status: String,
}
