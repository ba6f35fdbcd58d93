// src/routes/health.rs
//! Liveness endpoint for the floorcast service.
//!
//! Exposes `GET /health` so container orchestrators and CI smoke tests can
//! check that the process answers HTTP. Internal to this file are the handler
//! and its response type; the gateway (`mod.rs`) only sees the subrouter.

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Handle `GET /health`.
///
/// Answers without taking the dataset lock or calling the weather upstream.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Subrouter with the `/health` route, generic over the gateway's state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
