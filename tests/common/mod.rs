//! Shared harness: runs the real router on an ephemeral port.

use anyhow::Result;
use floorcast::{routes, AppState, Config, Dataset};

// ---

/// Start the service in the background and return its base URL.
pub async fn spawn_app(config: Config, dataset: Dataset) -> Result<String> {
    // ---
    let app = routes::router(AppState::new(config, dataset)?);
    spawn_router(app).await
}

/// Serve any router on `127.0.0.1:0` and return its base URL.
pub async fn spawn_router(app: axum::Router) -> Result<String> {
    // ---
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}
