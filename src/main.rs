//! Application entry point for the `floorcast` dashboard service.
//!
//! This binary orchestrates the startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Loading the operation record sets (bundled sample or configured exports)
//! - Mounting all API routes via the `routes` gateway
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `BIND_ADDR` (optional) – listen address (default: `0.0.0.0:8080`)
//! - `OWM_API_KEY` (optional) – weather API key
//! - `APP_LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `APP_SPAN_EVENTS` (optional) – span event mode for tracing
//!
//! See `config.rs` for the full list.
use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;

use floorcast::{config, routes, telemetry, AppState, Dataset};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    telemetry::init_tracing();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let dataset = Dataset::from_config(&cfg)
        .map_err(|e| anyhow::anyhow!("Failed to load operation records: {}", e))?;
    tracing::info!(
        "Loaded {} open and {} done operations ({:?})",
        dataset.open.len(),
        dataset.done.len(),
        dataset.source()
    );

    let addr = cfg.bind_addr;
    let state = AppState::new(cfg, dataset)?;

    // Build app from routes gateway
    let app: Router = routes::router(state);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
