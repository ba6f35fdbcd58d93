use axum::{
    extract::Query, extract::State, http::StatusCode, response::IntoResponse, routing::get, Json,
    Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::aggregate::daily_forecast;
use crate::models::{icon_url, CurrentConditions, DailyForecast};
use crate::weather_api::{ErrorKind, WeatherError};
use crate::AppState;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/weather/current", get(current))
        .route("/weather/forecast", get(forecast))
}

#[derive(Debug, Deserialize)]
pub struct CityQuery {
    city: Option<String>,
}

#[derive(Debug, Serialize)]
struct ForecastDay {
    #[serde(flatten)]
    day: DailyForecast,
    icon_url: String,
}

#[derive(Debug, Serialize)]
struct ForecastResponse {
    city: String,
    days: Vec<ForecastDay>,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    kind: ErrorKind,
    title: &'static str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

impl IntoResponse for WeatherError {
    fn into_response(self) -> axum::response::Response {
        // ---
        let kind = self.kind();
        let status = match kind {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::InvalidCredentials | ErrorKind::Failure => StatusCode::BAD_GATEWAY,
        };
        let body = ErrorBody {
            error: ErrorDetail {
                kind,
                title: kind.title(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}

fn resolve_city(params: CityQuery, state: &AppState) -> String {
    // ---
    params
        .city
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| state.config.default_city.clone())
}

async fn current(
    Query(params): Query<CityQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, WeatherError> {
    // ---
    let city = resolve_city(params, &state);
    info!("GET /weather/current city={:?}", city);

    let raw = state.weather.current(&city).await.map_err(|e| {
        error!("Failed to fetch current weather: {}", e);
        e
    })?;

    Ok((StatusCode::OK, Json(CurrentConditions::derive(&raw, Utc::now()))))
}

async fn forecast(
    Query(params): Query<CityQuery>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, WeatherError> {
    // ---
    let city = resolve_city(params, &state);
    info!("GET /weather/forecast city={:?}", city);

    let raw = state.weather.forecast(&city).await.map_err(|e| {
        error!("Failed to fetch forecast: {}", e);
        e
    })?;

    let samples = raw.samples();
    let days: Vec<ForecastDay> = daily_forecast(&samples, Utc::now().date_naive())
        .into_iter()
        .map(|day| ForecastDay {
            icon_url: icon_url(&day.icon),
            day,
        })
        .collect();
    info!("Folded {} forecast samples into {} days", samples.len(), days.len());

    Ok((StatusCode::OK, Json(ForecastResponse { city, days })))
}
