//! Data models for both dashboards.

mod operation;
mod weather;

pub use operation::{
    date, format_date, label_or_unknown, quantity, DoneOperation, OpenOperation, OperationHeader,
    RawOperationRow, UNKNOWN_LABEL,
};
pub use weather::{
    icon_url, local_clock, sun_progress, wind_direction, Backdrop, CurrentConditions,
    DailyForecast, ForecastSample, RawCondition, RawCurrentWeather, RawForecast, RawForecastEntry,
    RawForecastMain,
};
