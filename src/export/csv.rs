//! CSV projection: one header row and one data row.
//!
//! Cells that contain a delimiter, a quote, or a line break are quoted
//! per RFC 4180 with embedded quotes doubled. Plain cells are written
//! as-is.

use std::borrow::Cow;

use crate::export::{joined_or_na, text_or_na};
use crate::models::Record;

/// Fixed column order of the CSV export.
pub const CSV_HEADER: [&str; 7] = [
    "Licensor",
    "Licensee",
    "Effective Date",
    "Term Duration",
    "Scope of Use",
    "License Fee",
    "Royalty Terms",
];

/// Separator used when flattening `scope_of_use` into one cell.
pub const SCOPE_SEPARATOR: &str = " | ";

/// Render the header row and the record's data row, each ending in `\n`.
pub fn record_to_csv(record: &Record) -> String {
    let row = [
        text_or_na(record.licensor()),
        text_or_na(record.licensee()),
        text_or_na(record.effective_date()),
        text_or_na(record.term_duration()),
        joined_or_na(record.scope_of_use(), SCOPE_SEPARATOR),
        text_or_na(record.license_fee()),
        text_or_na(record.royalty_terms()),
    ];

    let mut out = CSV_HEADER.join(",");
    out.push('\n');
    out.push_str(
        &row.iter()
            .map(|cell| escape_cell(cell))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    out
}

fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}
