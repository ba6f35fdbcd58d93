//! Weather payloads from the OpenWeatherMap-compatible API and the values
//! the weather dashboard derives from them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ---

/// Base URL for condition icons.
pub const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Icon URL for a condition code, e.g. `10d`.
pub fn icon_url(icon: &str) -> String {
    format!("{ICON_BASE_URL}/{icon}@2x.png")
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawForecastMain {
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_max: f64,
}

/// One 3-hour entry of the `/forecast` response.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawForecastEntry {
    // ---
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub main: RawForecastMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    #[serde(default)]
    pub dt_txt: String,
}

/// The `/forecast` response; only the entry list is consumed.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawForecast {
    #[serde(default)]
    pub list: Vec<RawForecastEntry>,
}

/// A single sub-day forecast sample; `min_temp <= max_temp` even if the upstream swapped them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSample {
    // ---
    pub timestamp: i64,
    pub min_temp: f64,
    pub max_temp: f64,
    pub icon: String,
    pub description: String,
    /// `YYYY-MM-DD HH:MM:SS` in UTC, as sent by the API.
    pub dt_txt: String,
}

impl From<&RawForecastEntry> for ForecastSample {
    fn from(raw: &RawForecastEntry) -> Self {
        // ---
        let condition = raw.weather.first().cloned().unwrap_or_default();
        let (low, high) = (raw.main.temp_min, raw.main.temp_max);
        ForecastSample {
            timestamp: raw.dt,
            min_temp: low.min(high),
            max_temp: low.max(high),
            icon: condition.icon,
            description: condition.description,
            dt_txt: raw.dt_txt.clone(),
        }
    }
}

impl RawForecast {
    pub fn samples(&self) -> Vec<ForecastSample> {
        self.list.iter().map(ForecastSample::from).collect()
    }
}

/// One day of the multi-day outlook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    // ---
    pub date: NaiveDate,
    pub min_temp: f64,
    pub max_temp: f64,
    pub icon: String,
    pub description: String,
}

// ---

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawCurrentMain {
    #[serde(default)]
    pub temp: f64,
    #[serde(default)]
    pub feels_like: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub pressure: f64,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawWind {
    #[serde(default)]
    pub speed: f64,
    #[serde(default)]
    pub deg: f64,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawClouds {
    #[serde(default)]
    pub all: f64,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

/// The `/weather` response.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawCurrentWeather {
    // ---
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub sys: RawSys,
    /// Offset from UTC in seconds.
    #[serde(default)]
    pub timezone: i64,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
    #[serde(default)]
    pub main: RawCurrentMain,
    #[serde(default)]
    pub wind: RawWind,
    /// Metres.
    #[serde(default)]
    pub visibility: f64,
    #[serde(default)]
    pub clouds: RawClouds,
}

/// Background theme picked from the main condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backdrop {
    Clear,
    Clouds,
    Rain,
    Snow,
    Thunder,
    Mist,
    Default,
}

impl Backdrop {
    pub fn from_condition(main: &str) -> Self {
        // ---
        let main = main.to_lowercase();
        let has = |needle: &str| main.contains(needle);

        if has("clear") {
            Backdrop::Clear
        } else if has("cloud") {
            Backdrop::Clouds
        } else if has("rain") || has("drizzle") {
            Backdrop::Rain
        } else if has("snow") {
            Backdrop::Snow
        } else if has("thunder") {
            Backdrop::Thunder
        } else if has("mist") || has("fog") || has("haze") {
            Backdrop::Mist
        } else {
            Backdrop::Default
        }
    }
}

/// Widget values for the current-weather panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    // ---
    pub city: String,
    pub icon: String,
    pub icon_url: String,
    pub description: String,
    pub temperature: i64,
    pub feels_like: i64,
    pub humidity: f64,
    pub wind_kmh: i64,
    pub wind_direction: &'static str,
    pub pressure: f64,
    pub visibility_km: f64,
    pub clouds: f64,
    pub sunrise: String,
    pub sunset: String,
    /// City's offset from UTC in seconds, for a live clock.
    pub utc_offset_secs: i64,
    /// `HH:MM:SS` in the city at the time of the request.
    pub local_time: String,
    /// `DD.MM.YYYY` in the city at the time of the request.
    pub local_date: String,
    /// Position of the sun between sunrise (0.0) and sunset (1.0).
    pub sun_progress: f64,
    pub backdrop: Backdrop,
}

const COMPASS: [&str; 8] = ["N", "NO", "O", "SO", "S", "SW", "W", "NW"];

/// Eight-point German compass label for a bearing in degrees.
pub fn wind_direction(degrees: f64) -> &'static str {
    // ---
    let index = (degrees.rem_euclid(360.0) / 45.0).round() as usize % COMPASS.len();
    COMPASS[index]
}

fn shifted(timestamp: i64, offset_secs: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp.checked_add(offset_secs)?, 0)
}

/// `HH:MM` of a unix timestamp shifted by the location's UTC offset.
pub fn local_clock(timestamp: i64, offset_secs: i64) -> String {
    // ---
    shifted(timestamp, offset_secs)
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_default()
}

/// Fraction of daylight elapsed at `now`, clamped to `[0, 1]`.
pub fn sun_progress(sunrise: i64, sunset: i64, now: i64) -> f64 {
    // ---
    let day_length = sunset - sunrise;
    if day_length <= 0 {
        return 0.0;
    }
    ((now - sunrise) as f64 / day_length as f64).clamp(0.0, 1.0)
}

impl CurrentConditions {
    pub fn derive(raw: &RawCurrentWeather, now: DateTime<Utc>) -> Self {
        // ---
        let condition = raw.weather.first().cloned().unwrap_or_default();
        let local_now = shifted(now.timestamp(), raw.timezone);

        CurrentConditions {
            city: format!("{}, {}", raw.name, raw.sys.country),
            icon_url: icon_url(&condition.icon),
            icon: condition.icon,
            description: condition.description,
            temperature: raw.main.temp.round() as i64,
            feels_like: raw.main.feels_like.round() as i64,
            humidity: raw.main.humidity,
            wind_kmh: (raw.wind.speed * 3.6).round() as i64,
            wind_direction: wind_direction(raw.wind.deg),
            pressure: raw.main.pressure,
            visibility_km: (raw.visibility / 100.0).round() / 10.0,
            clouds: raw.clouds.all,
            sunrise: local_clock(raw.sys.sunrise, raw.timezone),
            sunset: local_clock(raw.sys.sunset, raw.timezone),
            utc_offset_secs: raw.timezone,
            local_time: local_now
                .map(|t| t.format("%H:%M:%S").to_string())
                .unwrap_or_default(),
            local_date: local_now
                .map(|t| t.format("%d.%m.%Y").to_string())
                .unwrap_or_default(),
            sun_progress: sun_progress(raw.sys.sunrise, raw.sys.sunset, now.timestamp()),
            backdrop: Backdrop::from_condition(&condition.main),
        }
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use chrono::TimeZone;

    fn create_test_current() -> RawCurrentWeather {
        // ---
        serde_json::from_value(serde_json::json!({
            "name": "Berlin",
            "sys": { "country": "DE", "sunrise": 1748746800, "sunset": 1748805600 },
            "timezone": 7200,
            "weather": [{ "main": "Rain", "description": "leichter Regen", "icon": "10d" }],
            "main": { "temp": 17.6, "feels_like": 17.2, "humidity": 72, "pressure": 1012 },
            "wind": { "speed": 4.1, "deg": 230 },
            "visibility": 10000,
            "clouds": { "all": 75 }
        }))
        .unwrap()
    }

    #[test]
    fn test_current_conditions_widgets() {
        // ---
        let raw = create_test_current();
        let now = Utc.timestamp_opt(1748776200, 0).unwrap();
        let current = CurrentConditions::derive(&raw, now);

        assert_eq!(current.city, "Berlin, DE");
        assert_eq!(current.temperature, 18);
        assert_eq!(current.feels_like, 17);
        assert_eq!(current.wind_kmh, 15);
        assert_eq!(current.wind_direction, "SW");
        assert_eq!(current.visibility_km, 10.0);
        assert_eq!(current.icon_url, "https://openweathermap.org/img/wn/10d@2x.png");
        assert_eq!(current.backdrop, Backdrop::Rain);
        assert_eq!(current.sun_progress, 0.5);
    }

    #[test]
    fn test_city_local_time() {
        // ---
        let mut raw = create_test_current();
        // 2025-06-01 22:30:15 UTC
        let now = Utc.timestamp_opt(1748817015, 0).unwrap();

        let current = CurrentConditions::derive(&raw, now);
        assert_eq!(current.utc_offset_secs, 7200);
        assert_eq!(current.local_time, "00:30:15");
        assert_eq!(current.local_date, "02.06.2025");

        raw.timezone = -14400;
        let current = CurrentConditions::derive(&raw, now);
        assert_eq!(current.local_time, "18:30:15");
        assert_eq!(current.local_date, "01.06.2025");
    }

    #[test]
    fn test_local_clock_applies_offset() {
        // ---
        // 2025-06-01 03:00 UTC is 05:00 in UTC+2
        assert_eq!(local_clock(1748746800, 7200), "05:00");
        assert_eq!(local_clock(1748746800, 0), "03:00");
    }

    #[test]
    fn test_wind_direction() {
        // ---
        assert_eq!(wind_direction(0.0), "N");
        assert_eq!(wind_direction(44.0), "NO");
        assert_eq!(wind_direction(90.0), "O");
        assert_eq!(wind_direction(180.0), "S");
        assert_eq!(wind_direction(350.0), "N");
        assert_eq!(wind_direction(360.0), "N");
    }

    #[test]
    fn test_sun_progress_is_clamped() {
        // ---
        assert_eq!(sun_progress(100, 200, 50), 0.0);
        assert_eq!(sun_progress(100, 200, 150), 0.5);
        assert_eq!(sun_progress(100, 200, 500), 1.0);
        assert_eq!(sun_progress(200, 200, 200), 0.0);
    }

    #[test]
    fn test_backdrop_categories() {
        // ---
        assert_eq!(Backdrop::from_condition("Clear"), Backdrop::Clear);
        assert_eq!(Backdrop::from_condition("Clouds"), Backdrop::Clouds);
        assert_eq!(Backdrop::from_condition("Drizzle"), Backdrop::Rain);
        assert_eq!(Backdrop::from_condition("Snow"), Backdrop::Snow);
        assert_eq!(Backdrop::from_condition("Thunderstorm"), Backdrop::Thunder);
        assert_eq!(Backdrop::from_condition("Haze"), Backdrop::Mist);
        assert_eq!(Backdrop::from_condition("Tornado"), Backdrop::Default);
    }

    #[test]
    fn test_forecast_sample_without_condition() {
        // ---
        let raw = RawForecastEntry {
            dt: 1748779200,
            main: RawForecastMain {
                temp_min: 20.0,
                temp_max: 28.0,
            },
            weather: vec![],
            dt_txt: "2025-06-01 12:00:00".to_string(),
        };
        let sample = ForecastSample::from(&raw);

        assert_eq!(sample.icon, "");
        assert_eq!(sample.description, "");
        assert_eq!(sample.max_temp, 28.0);
    }

    #[test]
    fn test_forecast_sample_with_swapped_temperatures() {
        // ---
        let raw = RawForecastEntry {
            main: RawForecastMain {
                temp_min: 25.0,
                temp_max: 20.0,
            },
            dt_txt: "2025-06-01 15:00:00".to_string(),
            ..Default::default()
        };
        let sample = ForecastSample::from(&raw);

        assert_eq!(sample.min_temp, 20.0);
        assert_eq!(sample.max_temp, 25.0);
    }
}
