//! Chart-ready series derived from the operation record sets.
//!
//! Every series is a set of parallel vectors: one label sequence and one or
//! more value sequences of the same length, in display order. All functions
//! are pure folds over the current records and accept empty input.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{format_date, label_or_unknown, DoneOperation, OpenOperation};

// ---

/// Theme colour tokens; the front end resolves them against its CSS palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Palette {
    Orange,
    Blue,
    Green,
    Purple,
    Muted,
    Gray,
}

/// Known operation states; anything else falls into `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    InProgress,
    Released,
    Waiting,
    Completed,
    Other,
}

impl StatusCategory {
    pub fn from_label(label: &str) -> Self {
        // ---
        match label.trim() {
            "In Bearbeitung" => StatusCategory::InProgress,
            "Freigegeben" => StatusCategory::Released,
            "Wartend" => StatusCategory::Waiting,
            "Abgeschlossen" => StatusCategory::Completed,
            _ => StatusCategory::Other,
        }
    }

    /// Colour of the slice in the status doughnut.
    pub fn chart_color(self) -> Palette {
        // ---
        match self {
            StatusCategory::InProgress => Palette::Orange,
            StatusCategory::Released => Palette::Blue,
            StatusCategory::Waiting => Palette::Muted,
            StatusCategory::Completed | StatusCategory::Other => Palette::Purple,
        }
    }

    /// Colour of the status badge in the operations table.
    pub fn badge_color(self) -> Palette {
        // ---
        match self {
            StatusCategory::InProgress => Palette::Orange,
            StatusCategory::Released => Palette::Blue,
            StatusCategory::Completed => Palette::Green,
            StatusCategory::Waiting | StatusCategory::Other => Palette::Gray,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatusDistribution {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
    pub colors: Vec<Palette>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkcenterLoad {
    pub labels: Vec<String>,
    pub open: Vec<usize>,
    pub done: Vec<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompletionTimeline {
    pub labels: Vec<String>,
    pub values: Vec<usize>,
}

/// Soll (planned) versus Ist (actual) per order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuantityComparison {
    pub labels: Vec<String>,
    pub planned: Vec<f64>,
    pub actual: Vec<f64>,
}

// ---

/// Open operations per status, in order of first appearance.
pub fn status_distribution(open: &[OpenOperation]) -> StatusDistribution {
    // ---
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series = StatusDistribution::default();

    for record in open {
        let label = label_or_unknown(&record.status);
        match index.get(label) {
            Some(&i) => series.values[i] += 1,
            None => {
                index.insert(label, series.labels.len());
                series.labels.push(label.to_string());
                series.values.push(1);
                series
                    .colors
                    .push(StatusCategory::from_label(label).chart_color());
            }
        }
    }
    series
}

/// Open and done operation counts per workcenter, sorted by workcenter id.
pub fn workcenter_load(open: &[OpenOperation], done: &[DoneOperation]) -> WorkcenterLoad {
    // ---
    let mut counts: BTreeMap<&str, (usize, usize)> = BTreeMap::new();

    for record in open {
        counts.entry(label_or_unknown(&record.header.workcenter)).or_default().0 += 1;
    }
    for record in done {
        counts.entry(label_or_unknown(&record.header.workcenter)).or_default().1 += 1;
    }

    let mut series = WorkcenterLoad::default();
    for (label, (open_count, done_count)) in counts {
        series.labels.push(label.to_string());
        series.open.push(open_count);
        series.done.push(done_count);
    }
    series
}

/// Done operations per actual-end date, oldest first.
///
/// Records without an actual-end date are not counted.
pub fn completion_timeline(done: &[DoneOperation]) -> CompletionTimeline {
    // ---
    let mut counts: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for end in done.iter().filter_map(|r| r.actual_end) {
        *counts.entry(end).or_default() += 1;
    }

    let mut series = CompletionTimeline::default();
    for (date, count) in counts {
        series.labels.push(format_date(date));
        series.values.push(count);
    }
    series
}

/// Planned and actual quantities summed over all operations of an order.
pub fn quantity_comparison(done: &[DoneOperation]) -> QuantityComparison {
    // ---
    let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for record in done {
        let entry = totals
            .entry(label_or_unknown(&record.header.order_id))
            .or_default();
        entry.0 += record.planned_qty;
        entry.1 += record.actual_qty;
    }

    let mut series = QuantityComparison::default();
    for (label, (planned, actual)) in totals {
        series.labels.push(label.to_string());
        series.planned.push(planned);
        series.actual.push(actual);
    }
    series
}
