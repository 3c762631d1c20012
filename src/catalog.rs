//! Static remote catalog.
//!
//! # Purpose
//! Declares the fixed set of micro-frontend remotes the shell can mount.
//! Seeds are built once at startup from configuration and never mutated;
//! only their rollout flags change at runtime.
use crate::config::RemoteUrls;
use crate::model::{CanaryFlag, RemoteConfig, RemoteVersion, RolloutConfig, RouteConfig};

pub const PLATFORM_NAME: &str = "mfe-platform";

const STABLE_VERSION: &str = "1.0.0-stable";
const CANARY_VERSION: &str = "1.0.0-canary";

/// Immutable descriptor of one remote: identity, mount point, access
/// roles, and the module-federation coordinates for both versions.
#[derive(Debug, Clone)]
pub struct RemoteSeed {
    pub id: String,
    pub title: String,
    pub path: String,
    pub required_roles: Vec<String>,
    pub scope: String,
    pub module: String,
    pub stable: RemoteVersion,
    pub canary: RemoteVersion,
}

impl RemoteSeed {
    /// Pair this seed's static fields with the current rollout flag.
    pub fn route_config(&self, flag: &CanaryFlag) -> RouteConfig {
        RouteConfig {
            id: self.id.clone(),
            title: self.title.clone(),
            path: self.path.clone(),
            required_roles: self.required_roles.clone(),
            remote: RemoteConfig {
                scope: self.scope.clone(),
                module: self.module.clone(),
                stable: self.stable.clone(),
                canary: self.canary.clone(),
                rollout: RolloutConfig::from_flag(flag),
            },
        }
    }
}

/// Build the catalog in declaration order. The order is part of the API
/// contract: registry documents and flag listings follow it.
pub fn seed_catalog(remotes: &RemoteUrls) -> Vec<RemoteSeed> {
    vec![
        seed(
            "remote-accounts",
            "Accounts",
            "/accounts",
            &["USER", "ADMIN"],
            "remote_accounts",
            &remotes.accounts_stable_url,
            &remotes.accounts_canary_url,
        ),
        seed(
            "remote-billing",
            "Billing",
            "/billing",
            &["USER", "ADMIN"],
            "remote_billing",
            &remotes.billing_stable_url,
            &remotes.billing_canary_url,
        ),
        seed(
            "remote-analytics",
            "Analytics",
            "/analytics",
            &["ADMIN"],
            "remote_analytics",
            &remotes.analytics_stable_url,
            &remotes.analytics_canary_url,
        ),
    ]
}

fn seed(
    id: &str,
    title: &str,
    path: &str,
    roles: &[&str],
    scope: &str,
    stable_url: &str,
    canary_url: &str,
) -> RemoteSeed {
    RemoteSeed {
        id: id.to_string(),
        title: title.to_string(),
        path: path.to_string(),
        required_roles: roles.iter().map(|role| role.to_string()).collect(),
        scope: scope.to_string(),
        module: "./App".to_string(),
        stable: RemoteVersion {
            url: stable_url.to_string(),
            version: STABLE_VERSION.to_string(),
        },
        canary: RemoteVersion {
            url: canary_url.to_string(),
            version: CANARY_VERSION.to_string(),
        },
    }
}
