//! Registry HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, catalog seeding, stores, and the HTTP router, then
//! starts the API server alongside the metrics endpoint.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
use mfe_registry::app::{build_router, AppState};
use mfe_registry::catalog::seed_catalog;
use mfe_registry::config::RegistryConfig;
use mfe_registry::observability;
use mfe_registry::store::{CanaryFlagStore, TelemetryBuffer};
use std::future::Future;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RegistryConfig::from_env_or_yaml().expect("registry config");
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: RegistryConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability();
    let state = build_state(&config);
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state);

    let addr = config.bind_addr;
    tracing::info!(%addr, "registry listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    let _ = metrics_task.await;
    Ok(())
}

fn build_state(config: &RegistryConfig) -> AppState {
    let catalog = seed_catalog(&config.remotes);
    let catalog_ids: Vec<String> = catalog.iter().map(|seed| seed.id.clone()).collect();
    AppState {
        catalog: Arc::new(catalog),
        canary_flags: CanaryFlagStore::new(catalog_ids),
        telemetry: TelemetryBuffer::default(),
        jwt_secret: config.jwt_secret.clone(),
        token_ttl: config.token_expiry,
        cors_allowed_origins: config.cors_allowed_origins.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::time::Duration;

    fn test_config() -> RegistryConfig {
        RegistryConfig {
            bind_addr: "127.0.0.1:0".parse().expect("bind"),
            metrics_bind: "127.0.0.1:0".parse().expect("metrics"),
            jwt_secret: "main-test-secret-0123456789abcdef".to_string(),
            token_expiry: Duration::from_secs(3600),
            cors_allowed_origins: vec!["http://localhost:5173".to_string()],
            remotes: mfe_registry::config::RemoteUrls::default(),
        }
    }

    #[tokio::test]
    async fn build_state_seeds_catalog() {
        let state = build_state(&test_config());
        assert_eq!(state.catalog.len(), 3);
        let flags = state.canary_flags.list_all().await;
        assert_eq!(flags.len(), 3);
        assert!(flags.iter().all(|flag| !flag.enabled));
    }

    #[tokio::test]
    #[serial]
    async fn run_with_shutdown_starts_and_stops() {
        run_with_shutdown(test_config(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
        })
        .await
        .expect("run should stop cleanly");
    }
}
