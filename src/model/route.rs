//! Route and registry document types served to shell clients.
//!
//! # Purpose
//! Defines the wire shape of the registry payload: one `RouteConfig` per
//! catalog remote, pairing static module-federation fields with the live
//! rollout state.
use crate::model::CanaryFlag;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A versioned remote entry point (stable or canary).
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct RemoteVersion {
    pub url: String,
    pub version: String,
}

/// Rollout state surfaced to clients. Advisory only: clients self-select
/// into the canary based on the percentage, the server never enforces it.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RolloutConfig {
    pub canary_enabled: bool,
    pub canary_percentage: u8,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    pub scope: String,
    pub module: String,
    pub stable: RemoteVersion,
    pub canary: RemoteVersion,
    pub rollout: RolloutConfig,
}

/// One navigable route in the shell, combining catalog metadata with the
/// remote's load configuration.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    pub id: String,
    pub title: String,
    pub path: String,
    /// Any role in this set grants access; evaluated by the consuming shell.
    pub required_roles: Vec<String>,
    pub remote: RemoteConfig,
}

/// The full registry payload. Recomputed on every read so it always
/// reflects the flag store at that instant; never cached.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
pub struct RegistryDocument {
    pub platform: String,
    pub routes: Vec<RouteConfig>,
}

impl RolloutConfig {
    pub fn from_flag(flag: &CanaryFlag) -> Self {
        Self {
            canary_enabled: flag.enabled,
            canary_percentage: flag.rollout_percentage,
        }
    }
}
