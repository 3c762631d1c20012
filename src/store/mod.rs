//! Shared runtime state stores.
//!
//! # Purpose
//! The two cross-request mutable structures: the canary flag map and the
//! bounded telemetry buffer. Both are internally synchronized; handlers
//! share them by cloning the store handles (cheap `Arc` clones) and never
//! touch the underlying collections directly.
pub mod canary;
pub mod telemetry;

pub use canary::{CanaryFlagStore, FlagError};
pub use telemetry::{TelemetryBuffer, DEFAULT_TELEMETRY_CAPACITY};
