//! Registry HTTP API module.
//!
//! # Purpose
//! Exposes the route handler modules and the shared error helpers.
pub mod auth;
pub mod error;
pub mod openapi;
pub mod registry;
pub mod telemetry;
pub mod types;
