//! Application state shared by all routes.
//!
//! The record sets live in one explicit [`Dataset`] value behind a lock. Routes
//! take a snapshot under a read guard and run the pure derivations in
//! [`crate::aggregate`]; uploads swap a whole set under the write guard.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::aggregate::Dashboard;
use crate::csv_source::{self, SAMPLE_DONE, SAMPLE_OPEN};
use crate::models::{DoneOperation, OpenOperation};
use crate::weather_api::WeatherClient;
use crate::Config;

// ---

/// Where the currently displayed records came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Both sets are the bundled sample exports.
    Sample,
    /// One set was supplied by the user, the other is still the sample.
    Partial,
    /// Both sets were supplied by the user.
    Uploaded,
}

impl DataSource {
    /// Banner text for the info bar; `None` hides it.
    pub fn banner(self) -> Option<&'static str> {
        // ---
        match self {
            DataSource::Sample => Some(
                "Sample data loaded. Upload your own CSV exports above to see your data.",
            ),
            DataSource::Partial => {
                Some("Some of your own data is loaded. Upload the second CSV export as well.")
            }
            DataSource::Uploaded => None,
        }
    }
}

/// The current open and done record sets.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    // ---
    pub open: Vec<OpenOperation>,
    pub done: Vec<DoneOperation>,
    pub open_uploaded: bool,
    pub done_uploaded: bool,
}

impl Dataset {
    /// The bundled sample exports.
    pub fn sample() -> Result<Self, csv_source::CsvError> {
        // ---
        Ok(Dataset {
            open: csv_source::load_open(SAMPLE_OPEN)?,
            done: csv_source::load_done(SAMPLE_DONE)?,
            open_uploaded: false,
            done_uploaded: false,
        })
    }

    /// Sample data, replaced by whichever exports the configuration names.
    pub fn from_config(config: &Config) -> Result<Self, csv_source::CsvError> {
        // ---
        let mut dataset = Dataset::sample()?;

        if let Some(path) = &config.open_csv_path {
            let records = csv_source::load_open(&csv_source::read_file(path)?)?;
            info!("Loaded {} open operations from {}", records.len(), path.display());
            dataset.replace_open(records);
        }
        if let Some(path) = &config.done_csv_path {
            let records = csv_source::load_done(&csv_source::read_file(path)?)?;
            info!("Loaded {} done operations from {}", records.len(), path.display());
            dataset.replace_done(records);
        }
        Ok(dataset)
    }

    pub fn replace_open(&mut self, records: Vec<OpenOperation>) {
        self.open = records;
        self.open_uploaded = true;
    }

    pub fn replace_done(&mut self, records: Vec<DoneOperation>) {
        self.done = records;
        self.done_uploaded = true;
    }

    pub fn source(&self) -> DataSource {
        // ---
        match (self.open_uploaded, self.done_uploaded) {
            (true, true) => DataSource::Uploaded,
            (false, false) => DataSource::Sample,
            _ => DataSource::Partial,
        }
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::derive(&self.open, &self.done)
    }
}

/// State handed to every axum handler.
#[derive(Debug, Clone)]
pub struct AppState {
    // ---
    pub config: Config,
    pub weather: WeatherClient,
    pub dataset: Arc<RwLock<Dataset>>,
}

impl AppState {
    pub fn new(config: Config, dataset: Dataset) -> Result<Self> {
        // ---
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.weather_timeout_secs))
            .build()?;
        let weather = WeatherClient::new(http, &config);

        Ok(AppState {
            config,
            weather,
            dataset: Arc::new(RwLock::new(dataset)),
        })
    }
}
