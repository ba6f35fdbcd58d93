//! Scalar KPI figures over the open and done record sets.

use std::collections::HashSet;

use serde::Serialize;

use crate::models::{label_or_unknown, DoneOperation, OpenOperation};

// ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    // ---
    pub distinct_orders: usize,
    pub open_count: usize,
    pub done_count: usize,
    /// Percent, one decimal.
    pub scrap_rate: f64,
    /// Percent, one decimal.
    pub completion_rate: f64,
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `100 * part / whole` rounded to one decimal, or `0.0` if `whole` is not positive.
pub fn percentage(part: f64, whole: f64) -> f64 {
    // ---
    if whole > 0.0 {
        round1(100.0 * part / whole)
    } else {
        0.0
    }
}

pub fn compute_kpis(open: &[OpenOperation], done: &[DoneOperation]) -> Kpis {
    // ---
    let orders: HashSet<&str> = open
        .iter()
        .map(|r| label_or_unknown(&r.header.order_id))
        .chain(done.iter().map(|r| label_or_unknown(&r.header.order_id)))
        .collect();

    let planned: f64 = done.iter().map(|r| r.planned_qty).sum();
    let scrap: f64 = done.iter().map(|r| r.scrap_qty).sum();
    let actual: f64 = done.iter().map(|r| r.actual_qty).sum();

    Kpis {
        distinct_orders: orders.len(),
        open_count: open.len(),
        done_count: done.len(),
        scrap_rate: percentage(scrap, planned),
        completion_rate: percentage(actual, planned),
    }
}
