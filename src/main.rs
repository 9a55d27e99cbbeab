//! Design Loom server binary
//!
//! Serves the design-system HTTP API. Runs against the hosted backend
//! when `DESIGN_LOOM_BACKEND_URL`/`DESIGN_LOOM_ANON_KEY` are set,
//! otherwise against the local fallback store.

use anyhow::{Context, Result};
use app_state::AppState;
use tracing_subscriber::EnvFilter;

const ENV_ADDR: &str = "DESIGN_LOOM_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let state = AppState::from_env().context("failed to build application state")?;
    let app = api::router(state);

    let addr = std::env::var(ENV_ADDR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutting down");
    }
}
