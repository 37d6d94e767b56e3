//! Article Engine — Binary Entrypoint
//! Boots the Axum HTTP server, wiring config, shared state, and middleware.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use article_engine::api::{create_router, AppState};
use article_engine::config::{config_path, start_hot_reload_thread, ConfigHandle, EngineConfig};
use article_engine::metrics::Metrics;
use article_engine::service::Engine;
use article_engine::store::MemoryStore;

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("article_engine=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    init_tracing();

    // --- Config + hot reload (dev-gated) ---
    let cfg = EngineConfig::load()?;
    let timeout_ms = cfg.extraction.timeout_ms;
    let handle = ConfigHandle::new(cfg);
    start_hot_reload_thread(handle.clone(), config_path());

    // --- Metrics recorder + /metrics ---
    let metrics = Metrics::init(timeout_ms);

    // In-memory store; real persistence plugs in behind the `Store` trait.
    let store = Arc::new(MemoryStore::new());
    let engine = Arc::new(Engine::new(store, handle));

    let state = AppState { engine };
    let router = create_router(state).merge(metrics.router());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "article engine listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
