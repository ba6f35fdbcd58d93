//! Backend for the manufacturing-order and weather dashboards.
//!
//! Module boundaries:
//! - `models`      – raw input records and the typed values derived from them
//! - `aggregate`   – pure derivations (daily forecast, KPIs, chart series)
//! - `csv_source`  – CSV ingestion for operation exports
//! - `weather_api` – upstream weather client and its error taxonomy
//! - `state`       – the current record sets and shared handler state
//! - `routes`      – the HTTP gateway
//! - `telemetry`   – tracing subscriber setup
pub mod aggregate;
pub mod config;
pub mod csv_source;
pub mod models;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod weather_api;

pub use config::Config;

// Re-exported so routes/*.rs depend on the crate root rather than on the
// modules that define these types.
pub use state::{AppState, Dataset};
