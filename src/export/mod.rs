//! Single-record export projections.
//!
//! `export` turns one `Record` into a download-ready `Payload`:
//!
//! - `json` – the full record, pretty-printed with 2-space indentation.
//! - `csv` – a fixed header row plus exactly one data row.
//! - `pdf_text` – ordered `label: value` lines plus the wrap width and
//!   line height a PDF renderer lays them out with.
//!
//! Absent, empty, or malformed fields render as `N/A` in the csv and
//! pdf_text projections.

use tracing::debug;

use crate::models::{ExportFormat, Payload, Record, PDF_LINE_HEIGHT, PDF_WRAP_WIDTH};

pub mod csv;
pub mod pdf;

/// Placeholder for values that are missing from a record.
pub const NOT_AVAILABLE: &str = "N/A";

/// Project `record` into `format`.
pub fn export(record: &Record, format: ExportFormat) -> Payload {
    match format {
        ExportFormat::Json => Payload::Json {
            text: record.to_pretty_json(),
        },
        ExportFormat::Csv => Payload::Csv {
            text: csv::record_to_csv(record),
        },
        ExportFormat::PdfText => Payload::PdfText {
            lines: pdf::record_to_lines(record),
            wrap_width: PDF_WRAP_WIDTH,
            line_height: PDF_LINE_HEIGHT,
        },
    }
}

/// Export the record at `index`, or nothing when there is no such record.
pub fn export_selected(records: &[Record], index: usize, format: ExportFormat) -> Option<Payload> {
    let Some(record) = records.get(index) else {
        debug!(index, total = records.len(), "no record to export");
        return None;
    };
    Some(export(record, format))
}

/// Text value or `N/A`.
pub(crate) fn text_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Joined list or `N/A` when the list is missing or empty.
pub(crate) fn joined_or_na(values: Option<Vec<&str>>, separator: &str) -> String {
    match values {
        Some(items) if !items.is_empty() => text_or_na(Some(items.join(separator).as_str())),
        _ => NOT_AVAILABLE.to_string(),
    }
}
