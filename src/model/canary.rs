//! Canary rollout flag record.
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Mutable rollout state for one remote. Replaced wholesale on every
/// update; a remote with no recorded flag is treated as disabled at 0%.
#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CanaryFlag {
    pub remote_id: String,
    pub enabled: bool,
    /// Always within [0, 100].
    pub rollout_percentage: u8,
}

impl CanaryFlag {
    /// The effective flag for a remote with no recorded state.
    pub fn default_for(remote_id: &str) -> Self {
        Self {
            remote_id: remote_id.to_string(),
            enabled: false,
            rollout_percentage: 0,
        }
    }
}
