//! Manufacturing operation records.
//!
//! CSV rows arrive as [`RawOperationRow`], where every column is an optional
//! string. The conversions into [`OpenOperation`] and [`DoneOperation`] are
//! the only place where untyped input becomes numbers and dates; everything
//! downstream works on well-typed fields with defined defaults.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---

/// Bucket label used for missing categorical fields (order id, workcenter, status).
pub const UNKNOWN_LABEL: &str = "unknown";

/// One CSV row exactly as exported from the shop-floor system.
///
/// Column names follow the German export headers. Open and done exports
/// share most columns; whatever a given export lacks stays `None`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RawOperationRow {
    // ---
    #[serde(rename = "Auftragsnr", default)]
    pub order_id: Option<String>,
    #[serde(rename = "Material", default)]
    pub material_id: Option<String>,
    #[serde(rename = "Bezeichnung", default)]
    pub description: Option<String>,
    #[serde(rename = "Arbeitsgang", default)]
    pub sequence: Option<String>,
    #[serde(rename = "AG_Bezeichnung", default)]
    pub operation_name: Option<String>,
    #[serde(rename = "Arbeitsplatz", default)]
    pub workcenter: Option<String>,
    #[serde(rename = "Planstart", default)]
    pub planned_start: Option<String>,
    #[serde(rename = "Planende", default)]
    pub planned_end: Option<String>,
    #[serde(rename = "Iststart", default)]
    pub actual_start: Option<String>,
    #[serde(rename = "Istende", default)]
    pub actual_end: Option<String>,
    #[serde(rename = "Sollmenge", default)]
    pub planned_qty: Option<String>,
    #[serde(rename = "Rueckmeldung", default)]
    pub reported_qty: Option<String>,
    #[serde(rename = "Istmenge", default)]
    pub actual_qty: Option<String>,
    #[serde(rename = "Ausschuss", default)]
    pub scrap_qty: Option<String>,
    #[serde(rename = "Status", default)]
    pub status: Option<String>,
}

/// Fields shared by open and done operations.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct OperationHeader {
    // ---
    pub order_id: String,
    pub material_id: String,
    pub description: String,
    pub sequence: String,
    pub operation_name: String,
    pub workcenter: String,
    pub planned_start: Option<NaiveDate>,
    pub planned_end: Option<NaiveDate>,
}

/// An operation that is released, waiting or in progress.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct OpenOperation {
    // ---
    #[serde(flatten)]
    pub header: OperationHeader,
    pub planned_qty: f64,
    pub reported_qty: f64,
    pub status: String,
}

/// A completed operation with actual dates and quantities.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct DoneOperation {
    // ---
    #[serde(flatten)]
    pub header: OperationHeader,
    pub actual_start: Option<NaiveDate>,
    pub actual_end: Option<NaiveDate>,
    pub planned_qty: f64,
    pub actual_qty: f64,
    pub scrap_qty: f64,
    pub status: String,
}

// ---

/// Trimmed text, or empty when the column is missing.
fn text(field: &Option<String>) -> String {
    field.as_deref().map(str::trim).unwrap_or_default().to_string()
}

/// Parse-or-default for quantities: anything that is not a finite number counts as zero.
pub fn quantity(field: &Option<String>) -> f64 {
    // ---
    field
        .as_deref()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Accepts `YYYY-MM-DD` and `YYYYMMDD`.
pub fn date(field: &Option<String>) -> Option<NaiveDate> {
    // ---
    let s = field.as_deref()?.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y%m%d"))
        .ok()
}

/// Substitute the unknown bucket label for an empty categorical value.
pub fn label_or_unknown(value: &str) -> &str {
    // ---
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_LABEL
    } else {
        trimmed
    }
}

impl RawOperationRow {
    // ---
    fn to_header(&self) -> OperationHeader {
        // ---
        OperationHeader {
            order_id: text(&self.order_id),
            material_id: text(&self.material_id),
            description: text(&self.description),
            sequence: text(&self.sequence),
            operation_name: text(&self.operation_name),
            workcenter: text(&self.workcenter),
            planned_start: date(&self.planned_start),
            planned_end: date(&self.planned_end),
        }
    }

    pub fn to_open(&self) -> OpenOperation {
        // ---
        OpenOperation {
            header: self.to_header(),
            planned_qty: quantity(&self.planned_qty),
            reported_qty: quantity(&self.reported_qty),
            status: text(&self.status),
        }
    }

    pub fn to_done(&self) -> DoneOperation {
        // ---
        DoneOperation {
            header: self.to_header(),
            actual_start: date(&self.actual_start),
            actual_end: date(&self.actual_end),
            planned_qty: quantity(&self.planned_qty),
            actual_qty: quantity(&self.actual_qty),
            scrap_qty: quantity(&self.scrap_qty),
            status: text(&self.status),
        }
    }

    /// True when every column is missing or blank.
    pub fn is_blank(&self) -> bool {
        // ---
        [
            &self.order_id,
            &self.material_id,
            &self.description,
            &self.sequence,
            &self.operation_name,
            &self.workcenter,
            &self.planned_start,
            &self.planned_end,
            &self.actual_start,
            &self.actual_end,
            &self.planned_qty,
            &self.reported_qty,
            &self.actual_qty,
            &self.scrap_qty,
            &self.status,
        ]
        .iter()
        .all(|f| f.as_deref().map_or(true, |s| s.trim().is_empty()))
    }
}

// ---

/// Dates in tables and chart labels use the German `DD.MM.YYYY` form.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// A date cell is searchable in both its display form and the ISO form of the export.
fn date_cells(date: Option<NaiveDate>) -> [String; 2] {
    // ---
    match date {
        Some(d) => [format_date(d), d.format("%Y-%m-%d").to_string()],
        None => [String::new(), String::new()],
    }
}

fn format_qty(qty: f64) -> String {
    qty.to_string()
}

/// Case-insensitive substring match over the rendered cells of a row.
fn cells_match<'a>(cells: impl IntoIterator<Item = &'a str>, term: &str) -> bool {
    // ---
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    cells
        .into_iter()
        .any(|cell| cell.to_lowercase().contains(&term))
}

impl OperationHeader {
    fn cells(&self) -> Vec<String> {
        // ---
        let mut cells = vec![
            self.order_id.clone(),
            self.material_id.clone(),
            self.description.clone(),
            self.sequence.clone(),
            self.operation_name.clone(),
            self.workcenter.clone(),
        ];
        cells.extend(date_cells(self.planned_start));
        cells.extend(date_cells(self.planned_end));
        cells
    }
}

impl OpenOperation {
    /// Table search over every column of the open-operations table.
    pub fn matches(&self, term: &str) -> bool {
        // ---
        let mut cells = self.header.cells();
        cells.push(format_qty(self.planned_qty));
        cells.push(format_qty(self.reported_qty));
        cells.push(self.status.clone());
        cells_match(cells.iter().map(String::as_str), term)
    }
}

impl DoneOperation {
    /// Table search over every column of the done-operations table.
    pub fn matches(&self, term: &str) -> bool {
        // ---
        let mut cells = self.header.cells();
        cells.extend(date_cells(self.actual_start));
        cells.extend(date_cells(self.actual_end));
        cells.push(format_qty(self.planned_qty));
        cells.push(format_qty(self.actual_qty));
        cells.push(format_qty(self.scrap_qty));
        cells.push(self.status.clone());
        cells_match(cells.iter().map(String::as_str), term)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn create_test_done_row() -> RawOperationRow {
        // ---
        RawOperationRow {
            order_id: some(" FA-2025-0100 "),
            material_id: some("MAT-3001"),
            description: some("Gehaeuse Typ A"),
            sequence: some("0010"),
            operation_name: some("Drehen"),
            workcenter: some("CNC-01"),
            planned_start: some("2025-01-06"),
            planned_end: some("2025-01-07"),
            actual_start: some("2025-01-06"),
            actual_end: some("2025-01-07"),
            planned_qty: some("100"),
            actual_qty: some("98"),
            scrap_qty: some("2"),
            status: some("Abgeschlossen"),
            ..Default::default()
        }
    }

    #[test]
    fn test_quantity_parse_or_default() {
        // ---
        assert_eq!(quantity(&some("200")), 200.0);
        assert_eq!(quantity(&some(" 12.5 ")), 12.5);
        assert_eq!(quantity(&some("")), 0.0);
        assert_eq!(quantity(&some("abc")), 0.0);
        assert_eq!(quantity(&some("NaN")), 0.0);
        assert_eq!(quantity(&some("inf")), 0.0);
        assert_eq!(quantity(&None), 0.0);
    }

    #[test]
    fn test_date_formats() {
        // ---
        let expected = NaiveDate::from_ymd_opt(2025, 2, 10);
        assert_eq!(date(&some("2025-02-10")), expected);
        assert_eq!(date(&some("20250210")), expected);
        assert_eq!(date(&some("10.02.2025")), None);
        assert_eq!(date(&None), None);
    }

    #[test]
    fn test_done_conversion() {
        // ---
        let done = create_test_done_row().to_done();

        assert_eq!(done.header.order_id, "FA-2025-0100");
        assert_eq!(done.header.workcenter, "CNC-01");
        assert_eq!(done.actual_end, NaiveDate::from_ymd_opt(2025, 1, 7));
        assert_eq!(done.planned_qty, 100.0);
        assert_eq!(done.actual_qty, 98.0);
        assert_eq!(done.scrap_qty, 2.0);
        assert_eq!(done.status, "Abgeschlossen");
    }

    #[test]
    fn test_open_conversion_with_missing_fields() {
        // ---
        let raw = RawOperationRow {
            order_id: some("FA-2025-0113"),
            planned_qty: some("n/a"),
            status: some("  In Bearbeitung "),
            ..Default::default()
        };
        let open = raw.to_open();

        assert_eq!(open.header.workcenter, "");
        assert_eq!(open.header.planned_start, None);
        assert_eq!(open.planned_qty, 0.0);
        assert_eq!(open.reported_qty, 0.0);
        assert_eq!(open.status, "In Bearbeitung");
    }

    #[test]
    fn test_label_or_unknown() {
        // ---
        assert_eq!(label_or_unknown("CNC-01"), "CNC-01");
        assert_eq!(label_or_unknown("   "), UNKNOWN_LABEL);
        assert_eq!(label_or_unknown(""), UNKNOWN_LABEL);
    }

    #[test]
    fn test_blank_row_detection() {
        // ---
        let blank = RawOperationRow {
            order_id: some("  "),
            ..Default::default()
        };
        assert!(blank.is_blank());
        assert!(!create_test_done_row().is_blank());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        // ---
        let done = create_test_done_row().to_done();

        assert!(done.matches(""));
        assert!(!done.matches("gehäuse"));
        assert!(done.matches("GEHAEUSE"));
        assert!(done.matches("cnc-01"));
        assert!(done.matches("07.01.2025"));
        assert!(!done.matches("FRAES"));
    }

    #[test]
    fn test_search_matches_iso_and_display_dates() {
        // ---
        let done = create_test_done_row().to_done();

        assert!(done.matches("2025-01-07"));
        assert!(done.matches("07.01.2025"));
        assert!(done.matches("2025-01"));
        assert!(!done.matches("2025-02-07"));

        let open = RawOperationRow {
            order_id: some("FA-2025-0120"),
            planned_start: some("20250210"),
            ..Default::default()
        }
        .to_open();
        assert!(open.matches("2025-02-10"));
        assert!(open.matches("10.02.2025"));
    }
}
