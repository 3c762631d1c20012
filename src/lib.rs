//! Micro-frontend registry service library crate.
//!
//! # Purpose
//! Exposes the registry API surface, auth helpers, configuration, and the
//! in-memory canary flag / telemetry stores for use by the binary and tests.
//!
//! # Notes
//! Module boundaries mirror the HTTP API and runtime state for clarity.
pub mod api;
pub mod app;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod context;
pub mod model;
pub mod observability;
pub mod store;
