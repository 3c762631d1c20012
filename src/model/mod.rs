//! Registry data model module.
//!
//! # Purpose
//! Re-exports the route/rollout/telemetry payload types shared by the API
//! handlers and the in-memory stores.
mod canary;
mod route;
mod telemetry;

pub use canary::CanaryFlag;
pub use route::{RegistryDocument, RemoteConfig, RemoteVersion, RolloutConfig, RouteConfig};
pub use telemetry::TelemetryRecord;
