//! Folds 3-hour forecast samples into one summary per calendar day.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::models::{DailyForecast, ForecastSample};

// ---

/// Number of days in the outlook.
pub const MAX_FORECAST_DAYS: usize = 5;

/// Split `YYYY-MM-DD HH:MM:SS` into its date and time portions.
fn split_dt_txt(dt_txt: &str) -> (&str, &str) {
    dt_txt.trim().split_once(' ').unwrap_or((dt_txt.trim(), ""))
}

fn is_noon(time: &str) -> bool {
    // ---
    let noon = NaiveTime::from_hms_opt(12, 0, 0);
    NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .ok()
        == noon
}

/// Calendar date of a group key, falling back to the sample's UTC timestamp.
fn summary_date(key: &str, sample: &ForecastSample) -> NaiveDate {
    // ---
    NaiveDate::parse_from_str(key, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::<Utc>::from_timestamp(sample.timestamp, 0).map(|t| t.date_naive()))
        .unwrap_or_default()
}

/// Collapse time-ordered samples into at most [`MAX_FORECAST_DAYS`] daily
/// summaries, excluding `today`.
///
/// Samples are grouped by the date portion of `dt_txt`. The first sample of
/// a day seeds the summary; later ones widen the min/max range, and a noon
/// sample replaces the icon and description (the last noon sample wins).
/// Days keep the order in which they first appear. A sample whose bounds
/// arrive swapped still widens the range by both values, so every summary
/// has `min_temp <= max_temp`.
pub fn daily_forecast(samples: &[ForecastSample], today: NaiveDate) -> Vec<DailyForecast> {
    // ---
    let mut days: Vec<DailyForecast> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sample in samples {
        let (key, time) = split_dt_txt(&sample.dt_txt);
        let low = sample.min_temp.min(sample.max_temp);
        let high = sample.min_temp.max(sample.max_temp);

        match index.get(key) {
            None => {
                index.insert(key, days.len());
                days.push(DailyForecast {
                    date: summary_date(key, sample),
                    min_temp: low,
                    max_temp: high,
                    icon: sample.icon.clone(),
                    description: sample.description.clone(),
                });
            }
            Some(&i) => {
                let day = &mut days[i];
                day.min_temp = day.min_temp.min(low);
                day.max_temp = day.max_temp.max(high);

                if is_noon(time) {
                    day.icon = sample.icon.clone();
                    day.description = sample.description.clone();
                }
            }
        }
    }

    days.into_iter()
        .filter(|d| d.date != today)
        .take(MAX_FORECAST_DAYS)
        .collect()
}
