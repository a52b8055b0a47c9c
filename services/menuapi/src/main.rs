//! Menu HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, seed data, the in-memory store and the HTTP router,
//! then serves the API and the metrics endpoint until shutdown.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
use anyhow::Context;
use menuapi::app::{AppState, build_router};
use menuapi::config::MenuApiConfig;
use menuapi::observability;
use menuapi::seed::Seed;
use menuapi::store::memory::InMemoryStore;
use metrics_exporter_prometheus::PrometheusHandle;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = MenuApiConfig::from_env_or_yaml().context("menu api config")?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: MenuApiConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("menuapi")?;
    let state = build_state(&config)?;
    let metrics_task = tokio::spawn(run_metrics_endpoint(metrics_handle, config.metrics_bind));

    let app = build_router(state);
    let addr = config.bind_addr;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    tracing::info!(%addr, "menu api listening");
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await?;

    metrics_task.abort();
    let _ = metrics_task.await;
    tracing::info!("menu api stopped");
    Ok(())
}

async fn run_metrics_endpoint(handle: PrometheusHandle, addr: SocketAddr) {
    if let Err(err) = observability::serve_metrics(handle, addr).await {
        tracing::error!(%addr, error = %err, "metrics endpoint stopped");
    }
}

fn build_state(config: &MenuApiConfig) -> anyhow::Result<AppState> {
    let seed = match &config.seed_path {
        Some(path) => Seed::from_yaml_file(path)?,
        None => Seed::builtin(),
    };
    tracing::info!(
        dishes = seed.dishes.len(),
        users = seed.users.len(),
        "seeded in-memory store"
    );
    Ok(AppState::new(Arc::new(InMemoryStore::new(seed))))
}
