//! Registry configuration sourced from environment variables, with an
//! optional YAML override file for deployments that prefer one.
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

pub const DEFAULT_TOKEN_EXPIRY_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct RegistryConfig {
    pub bind_addr: SocketAddr,
    pub metrics_bind: SocketAddr,
    pub jwt_secret: String,
    pub token_expiry: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub remotes: RemoteUrls,
}

/// Stable and canary entry-point URLs for each catalog remote.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUrls {
    pub accounts_stable_url: String,
    pub accounts_canary_url: String,
    pub billing_stable_url: String,
    pub billing_canary_url: String,
    pub analytics_stable_url: String,
    pub analytics_canary_url: String,
}

impl Default for RemoteUrls {
    fn default() -> Self {
        // Local vite preview ports for the three remotes.
        Self {
            accounts_stable_url: "http://localhost:4174/assets/remoteEntry.js".to_string(),
            accounts_canary_url: "http://localhost:4184/assets/remoteEntry.js".to_string(),
            billing_stable_url: "http://localhost:4175/assets/remoteEntry.js".to_string(),
            billing_canary_url: "http://localhost:4185/assets/remoteEntry.js".to_string(),
            analytics_stable_url: "http://localhost:4176/assets/remoteEntry.js".to_string(),
            analytics_canary_url: "http://localhost:4186/assets/remoteEntry.js".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RegistryConfigOverride {
    bind_addr: Option<String>,
    metrics_bind: Option<String>,
    jwt_secret: Option<String>,
    token_expiry_secs: Option<u64>,
    cors_allowed_origins: Option<Vec<String>>,
    remotes: Option<RemoteUrls>,
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self> {
        let bind_addr = std::env::var("MFE_REGISTRY_BIND")
            .unwrap_or_else(|_| "0.0.0.0:8081".to_string())
            .parse()
            .with_context(|| "parse MFE_REGISTRY_BIND")?;
        let metrics_bind = std::env::var("MFE_REGISTRY_METRICS_BIND")
            .unwrap_or_else(|_| "0.0.0.0:9091".to_string())
            .parse()
            .with_context(|| "parse MFE_REGISTRY_METRICS_BIND")?;
        let jwt_secret = std::env::var("MFE_JWT_SECRET")
            .unwrap_or_else(|_| "local-dev-secret-change-me-0123456789".to_string());
        let token_expiry_secs = match std::env::var("MFE_JWT_EXPIRY_SECS") {
            Ok(value) => value.parse().with_context(|| "parse MFE_JWT_EXPIRY_SECS")?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_SECS,
        };
        let cors_allowed_origins = std::env::var("MFE_CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let defaults = RemoteUrls::default();
        let remotes = RemoteUrls {
            accounts_stable_url: env_or("MFE_REMOTE_ACCOUNTS_STABLE_URL", defaults.accounts_stable_url),
            accounts_canary_url: env_or("MFE_REMOTE_ACCOUNTS_CANARY_URL", defaults.accounts_canary_url),
            billing_stable_url: env_or("MFE_REMOTE_BILLING_STABLE_URL", defaults.billing_stable_url),
            billing_canary_url: env_or("MFE_REMOTE_BILLING_CANARY_URL", defaults.billing_canary_url),
            analytics_stable_url: env_or("MFE_REMOTE_ANALYTICS_STABLE_URL", defaults.analytics_stable_url),
            analytics_canary_url: env_or("MFE_REMOTE_ANALYTICS_CANARY_URL", defaults.analytics_canary_url),
        };

        Ok(Self {
            bind_addr,
            metrics_bind,
            jwt_secret,
            token_expiry: Duration::from_secs(token_expiry_secs),
            cors_allowed_origins,
            remotes,
        })
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("MFE_REGISTRY_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read MFE_REGISTRY_CONFIG: {path}"))?;
            let override_cfg: RegistryConfigOverride =
                serde_yaml::from_str(&contents).with_context(|| "parse registry config yaml")?;
            if let Some(value) = override_cfg.bind_addr {
                config.bind_addr = value.parse().with_context(|| "parse bind_addr")?;
            }
            if let Some(value) = override_cfg.metrics_bind {
                config.metrics_bind = value.parse().with_context(|| "parse metrics_bind")?;
            }
            if let Some(value) = override_cfg.jwt_secret {
                config.jwt_secret = value;
            }
            if let Some(value) = override_cfg.token_expiry_secs {
                config.token_expiry = Duration::from_secs(value);
            }
            if let Some(value) = override_cfg.cors_allowed_origins {
                config.cors_allowed_origins = value;
            }
            if let Some(value) = override_cfg.remotes {
                config.remotes = value;
            }
        }
        Ok(config)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}
