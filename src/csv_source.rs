//! CSV adapter for the open/done operation exports.
//!
//! Exports come from different tools and use different delimiters, so the
//! delimiter is sniffed from the header line. Rows are read leniently: short
//! rows, blank lines and unknown columns are all tolerated, and field-level
//! coercion happens in [`RawOperationRow`].

use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::debug;

use crate::models::{DoneOperation, OpenOperation, RawOperationRow};

// ---

/// Bundled sample export of open operations.
pub const SAMPLE_OPEN: &str = include_str!("../data/sample_open.csv");

/// Bundled sample export of done operations.
pub const SAMPLE_DONE: &str = include_str!("../data/sample_done.csv");

const CANDIDATE_DELIMITERS: [u8; 4] = [b';', b',', b'\t', b'|'];

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("Failed to parse CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("Failed to read CSV file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        // ---
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

/// Decode an export as UTF-8, dropping a leading byte-order mark.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str, CsvError> {
    // ---
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    std::str::from_utf8(bytes).map_err(|e| {
        let valid = &bytes[..e.valid_up_to()];
        let line = valid.iter().filter(|&&b| b == b'\n').count() as u64 + 1;
        CsvError::Parse {
            line,
            message: format!("invalid UTF-8 at byte {}", e.valid_up_to()),
        }
    })
}

/// Pick the delimiter that occurs most often in the header line; `,` if none do.
pub fn detect_delimiter(text: &str) -> u8 {
    // ---
    let header = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");

    let mut best = (b',', 0);
    for delimiter in CANDIDATE_DELIMITERS {
        let count = header.bytes().filter(|&b| b == delimiter).count();
        if count > best.1 {
            best = (delimiter, count);
        }
    }
    best.0
}

/// Parse an export into untyped rows, skipping rows with no content.
pub fn parse_operations(text: &str) -> Result<Vec<RawOperationRow>, CsvError> {
    // ---
    let text = text.trim();
    let delimiter = detect_delimiter(text);

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.deserialize::<RawOperationRow>() {
        let row = result?;
        if row.is_blank() {
            continue;
        }
        rows.push(row);
    }

    debug!(
        "Parsed {} CSV rows (delimiter {:?})",
        rows.len(),
        delimiter as char
    );
    Ok(rows)
}

pub fn load_open(text: &str) -> Result<Vec<OpenOperation>, CsvError> {
    Ok(parse_operations(text)?.iter().map(RawOperationRow::to_open).collect())
}

pub fn load_done(text: &str) -> Result<Vec<DoneOperation>, CsvError> {
    Ok(parse_operations(text)?.iter().map(RawOperationRow::to_done).collect())
}

/// Read a whole export file into memory.
pub fn read_file(path: &Path) -> Result<String, CsvError> {
    // ---
    let bytes = std::fs::read(path).map_err(|source| CsvError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_utf8(&bytes)?.to_string())
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        // ---
        assert_eq!(detect_delimiter("Auftragsnr;Material;Status\n1;2;3"), b';');
        assert_eq!(detect_delimiter("Auftragsnr,Material,Status"), b',');
        assert_eq!(detect_delimiter("Auftragsnr\tMaterial\tStatus"), b'\t');
        assert_eq!(detect_delimiter("\n\nAuftragsnr|Material"), b'|');
        assert_eq!(detect_delimiter("Auftragsnr"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn test_sample_data_loads() {
        // ---
        let open = load_open(SAMPLE_OPEN).unwrap();
        let done = load_done(SAMPLE_DONE).unwrap();

        assert_eq!(open.len(), 30);
        assert_eq!(done.len(), 35);
        assert_eq!(open[0].header.order_id, "FA-2025-0112");
        assert_eq!(open[0].status, "Freigegeben");
        assert_eq!(open[3].reported_qty, 80.0);
        assert_eq!(done[0].scrap_qty, 2.0);
        assert!(done.iter().all(|d| d.actual_end.is_some()));
    }

    #[test]
    fn test_blank_and_short_rows() {
        // ---
        let text = "\
Auftragsnr,Arbeitsplatz,Sollmenge,Status

FA-1,CNC-01,100,Wartend
,,,
FA-2,CNC-02
";
        let open = load_open(text).unwrap();

        assert_eq!(open.len(), 2);
        assert_eq!(open[1].header.workcenter, "CNC-02");
        assert_eq!(open[1].planned_qty, 0.0);
        assert_eq!(open[1].status, "");
    }

    #[test]
    fn test_unknown_columns_are_ignored() {
        // ---
        let text = "Auftragsnr;Kostenstelle;Istmenge\nFA-9;4711;12\n";
        let done = load_done(text).unwrap();

        assert_eq!(done.len(), 1);
        assert_eq!(done[0].actual_qty, 12.0);
        assert_eq!(done[0].planned_qty, 0.0);
    }

    #[test]
    fn test_empty_text_yields_no_rows() {
        // ---
        assert!(parse_operations("").unwrap().is_empty());
        assert!(parse_operations("Auftragsnr;Status\n").unwrap().is_empty());
    }

    #[test]
    fn test_decode_utf8() {
        // ---
        let text = decode_utf8(b"\xEF\xBB\xBFAuftragsnr;Status\nFA-1;Wartend\n").unwrap();
        assert!(text.starts_with("Auftragsnr"));
        assert_eq!(load_open(text).unwrap()[0].header.order_id, "FA-1");

        let err = decode_utf8(b"Auftragsnr;Status\nFA-1;\xFF\n").unwrap_err();
        match err {
            CsvError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_file_reports_path() {
        // ---
        let err = read_file(Path::new("/nonexistent/open.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/open.csv"));
    }
}
