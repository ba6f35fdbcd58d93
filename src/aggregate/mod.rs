//! Aggregation core: pure derivations from record sets to display values.
//!
//! Nothing in here holds state between calls. Callers hand in the current
//! records and get freshly computed values back; the inputs are never
//! mutated.

use serde::Serialize;

use crate::models::{DoneOperation, OpenOperation};

pub mod forecast;
pub mod kpi;
pub mod series;

pub use forecast::{daily_forecast, MAX_FORECAST_DAYS};
pub use kpi::{compute_kpis, Kpis};
pub use series::{
    completion_timeline, quantity_comparison, status_distribution, workcenter_load,
    CompletionTimeline, Palette, QuantityComparison, StatusCategory, StatusDistribution,
    WorkcenterLoad,
};

// ---

/// KPI tiles plus the four chart series of the manufacturing dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    // ---
    pub kpis: Kpis,
    pub status: StatusDistribution,
    pub workcenters: WorkcenterLoad,
    pub timeline: CompletionTimeline,
    pub quantities: QuantityComparison,
}

impl Dashboard {
    /// Recompute every figure from scratch.
    pub fn derive(open: &[OpenOperation], done: &[DoneOperation]) -> Self {
        // ---
        Dashboard {
            kpis: compute_kpis(open, done),
            status: status_distribution(open),
            workcenters: workcenter_load(open, done),
            timeline: completion_timeline(done),
            quantities: quantity_comparison(done),
        }
    }
}
