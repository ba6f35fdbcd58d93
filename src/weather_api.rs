//! Client for the OpenWeatherMap-compatible current-weather and forecast API.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{RawCurrentWeather, RawForecast};
use crate::Config;

// ---

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("Invalid API key; set OWM_API_KEY to a valid key")]
    InvalidCredentials,

    #[error("City \"{0}\" was not found; please check the input")]
    CityNotFound(String),

    #[error("Weather data could not be loaded (upstream status {0})")]
    Unavailable(StatusCode),

    /// Network or decode failure. The request URL is stripped since it carries the key.
    #[error("Weather data could not be loaded: {0}")]
    Transport(reqwest::Error),
}

/// The three failure categories shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidCredentials,
    NotFound,
    Failure,
}

impl ErrorKind {
    pub fn title(self) -> &'static str {
        // ---
        match self {
            ErrorKind::InvalidCredentials => "API key problem",
            ErrorKind::NotFound => "City not found",
            ErrorKind::Failure => "Error",
        }
    }
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        // ---
        match self {
            WeatherError::InvalidCredentials => ErrorKind::InvalidCredentials,
            WeatherError::CityNotFound(_) => ErrorKind::NotFound,
            WeatherError::Unavailable(_) | WeatherError::Transport(_) => ErrorKind::Failure,
        }
    }

    fn transport(err: reqwest::Error) -> Self {
        WeatherError::Transport(err.without_url())
    }

    /// Classify a non-success upstream status.
    pub fn from_status(status: StatusCode, city: &str) -> Self {
        // ---
        match status {
            StatusCode::UNAUTHORIZED => WeatherError::InvalidCredentials,
            StatusCode::NOT_FOUND => WeatherError::CityNotFound(city.to_string()),
            other => WeatherError::Unavailable(other),
        }
    }
}

/// Thin wrapper around a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct WeatherClient {
    // ---
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        // ---
        WeatherClient {
            http,
            base_url: config.weather_base_url.trim_end_matches('/').to_string(),
            api_key: config.weather_api_key.clone(),
        }
    }

    /// Current conditions for `city`.
    pub async fn current(&self, city: &str) -> Result<RawCurrentWeather, WeatherError> {
        self.get("weather", city).await
    }

    /// 3-hour forecast for the next five days.
    pub async fn forecast(&self, city: &str) -> Result<RawForecast, WeatherError> {
        self.get("forecast", city).await
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, city: &str) -> Result<T, WeatherError> {
        // ---
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("Fetching {} for {:?}", url, city);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
                ("lang", "de"),
            ])
            .send()
            .await
            .map_err(WeatherError::transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!("Upstream {} returned {} for {:?}", endpoint, status, city);
            return Err(WeatherError::from_status(status, city));
        }

        response.json::<T>().await.map_err(WeatherError::transport)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_status_classification() {
        // ---
        let err = WeatherError::from_status(StatusCode::UNAUTHORIZED, "Berlin");
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);

        let err = WeatherError::from_status(StatusCode::NOT_FOUND, "Atlantis");
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("Atlantis"));

        let err = WeatherError::from_status(StatusCode::TOO_MANY_REQUESTS, "Berlin");
        assert_eq!(err.kind(), ErrorKind::Failure);
        assert_eq!(ErrorKind::Failure.title(), "Error");
    }
}
