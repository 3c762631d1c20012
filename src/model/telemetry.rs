//! Telemetry record stored in the bounded in-memory buffer.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One client-reported event, immutable once constructed. Identity and
/// correlation fields are resolved by the ingesting endpoint before the
/// record reaches the buffer, so every stored record carries usable ids.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    /// Server-side RFC 3339 timestamp assigned at ingestion.
    pub timestamp: String,
    pub correlation_id: String,
    pub request_id: String,
    pub session_id: String,
    /// Credential subject, explicit user header, or "anonymous".
    pub user_id: String,
    pub event_type: String,
    pub remote_id: Option<String>,
    pub route_id: Option<String>,
    pub level: String,
    pub duration_ms: Option<u64>,
    pub message: Option<String>,
    /// Open JSON mapping supplied by the client; stored verbatim.
    #[schema(value_type = Option<Object>)]
    pub metadata: Option<serde_json::Value>,
}
