// =============================================================================
// ARION Technical Analysis Service — Main Entry Point
// =============================================================================
//
// Stateless HTTP service: POST a list of OHLCV candles to /calculate and get
// back RSI, EMA(20/50/200), volume status and simple trend/momentum hints.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod api;
mod error;
mod indicators;
mod market_data;
mod report;
mod service_config;
mod signals;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::service_config::{ServiceConfig, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & logging ─────────────────────────────────────────
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("╔══════════════════════════════════════════════════════════╗");
    info!("║     ARION Technical Analysis Service — Starting Up       ║");
    info!("╚══════════════════════════════════════════════════════════╝");

    // ── 2. Configuration ─────────────────────────────────────────────────
    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let mut config = ServiceConfig::load(&config_path).unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        ServiceConfig::default()
    });
    config.apply_env()?;
    config.validate()?;

    info!(
        bind_addr = %config.bind_addr(),
        max_body_bytes = config.max_body_bytes,
        "Service configured"
    );

    // ── 3. HTTP server ───────────────────────────────────────────────────
    let app = api::router(&config);
    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("ARION Technical Analysis Service shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received — stopping gracefully");
}
