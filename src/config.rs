//! Configuration loader for the `floorcast` dashboard service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller). By consolidating configuration logic here, we
//! avoid scattering `env::var` calls throughout the codebase.
//!
use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Result};

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_u64 {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<u64>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Read an optional string environment variable, falling back to a default.
macro_rules! env_or {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| $default.to_string())
    };
}

/// Read an optional path environment variable.
macro_rules! optional_path {
    ($var_name:expr) => {
        env::var($var_name)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    };
}

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
pub const DEFAULT_CITY: &str = "Berlin";

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// OpenWeatherMap API key. Empty means every weather call fails with 401.
    pub weather_api_key: String,

    /// Weather API base URL.
    pub weather_base_url: String,

    /// City used when a weather request names none.
    pub default_city: String,

    /// Upstream request timeout in seconds.
    pub weather_timeout_secs: u64,

    /// Open-operations export loaded at startup instead of the bundled sample.
    pub open_csv_path: Option<PathBuf>,

    /// Done-operations export loaded at startup instead of the bundled sample.
    pub done_csv_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        // ---
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            weather_api_key: String::new(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            default_city: DEFAULT_CITY.to_string(),
            weather_timeout_secs: 10,
            open_csv_path: None,
            done_csv_path: None,
        }
    }
}

/// Load configuration from environment variables with defaults.
///
/// Optional:
/// - `BIND_ADDR` – listen address (default: 0.0.0.0:8080)
/// - `OWM_API_KEY` – weather API key (default: empty)
/// - `OWM_BASE_URL` – weather API base URL
/// - `DEFAULT_CITY` – fallback city (default: Berlin)
/// - `WEATHER_TIMEOUT_SECS` – upstream timeout (default: 10)
/// - `OPEN_CSV_PATH` / `DONE_CSV_PATH` – exports to load at startup
///
/// Returns an error if any variable is present but invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let bind_addr = env_or!("BIND_ADDR", DEFAULT_BIND_ADDR)
        .parse::<SocketAddr>()
        .map_err(|e| anyhow!("Invalid BIND_ADDR: {}", e))?;
    let weather_api_key = env_or!("OWM_API_KEY", "");
    let weather_base_url = env_or!("OWM_BASE_URL", DEFAULT_WEATHER_BASE_URL);
    let default_city = env_or!("DEFAULT_CITY", DEFAULT_CITY);
    let weather_timeout_secs = parse_env_u64!("WEATHER_TIMEOUT_SECS", 10);

    Ok(Config {
        bind_addr,
        weather_api_key,
        weather_base_url,
        default_city,
        weather_timeout_secs,
        open_csv_path: optional_path!("OPEN_CSV_PATH"),
        done_csv_path: optional_path!("DONE_CSV_PATH"),
    })
}

/// Show only the first four characters of a secret.
fn mask_secret(secret: &str) -> String {
    // ---
    if secret.is_empty() {
        return "<unset>".to_string();
    }
    let visible: String = secret.chars().take(4).collect();
    format!("{visible}****")
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    ///
    /// Masks the API key while showing all other values that were loaded.
    pub fn log_config(&self) {
        // ---
        let show_path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<bundled sample>".to_string())
        };

        tracing::info!("Configuration loaded:");
        tracing::info!("  BIND_ADDR            : {}", self.bind_addr);
        tracing::info!("  OWM_API_KEY          : {}", mask_secret(&self.weather_api_key));
        tracing::info!("  OWM_BASE_URL         : {}", self.weather_base_url);
        tracing::info!("  DEFAULT_CITY         : {}", self.default_city);
        tracing::info!("  WEATHER_TIMEOUT_SECS : {}", self.weather_timeout_secs);
        tracing::info!("  OPEN_CSV_PATH        : {}", show_path(&self.open_csv_path));
        tracing::info!("  DONE_CSV_PATH        : {}", show_path(&self.done_csv_path));

        if self.weather_api_key.is_empty() {
            tracing::warn!("OWM_API_KEY is not set; weather requests will be rejected upstream");
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_mask_secret() {
        // ---
        assert_eq!(mask_secret(""), "<unset>");
        assert_eq!(mask_secret("abcdef123456"), "abcd****");
        assert_eq!(mask_secret("ab"), "ab****");
    }

    #[test]
    fn test_defaults() {
        // ---
        let cfg = Config::default();
        assert_eq!(cfg.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(cfg.default_city, "Berlin");
        assert!(cfg.open_csv_path.is_none());
    }
}
