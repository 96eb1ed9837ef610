//! Shared data models for records, query configs, results, and export
//! payloads.
//!
//! These types form the stable JSON API surface used by the CLI and
//! the daemon/server mode.

use serde::{Deserialize, Serialize};

mod record;

pub use record::Record;

/// Schema version for `QueryResult` JSON payloads.
///
/// This version follows semver semantics (MAJOR.MINOR.PATCH):
/// - MAJOR: Breaking changes to required fields or field semantics.
/// - MINOR: Backward-compatible additions (new optional fields).
/// - PATCH: Documentation or internal changes only.
pub const QUERY_RESULT_VERSION: &str = "1.0.0";

/// Text-wrap width, in layout units, handed to the PDF collaborator.
pub const PDF_WRAP_WIDTH: f32 = 180.0;

/// Vertical advance per rendered PDF line, in layout units.
pub const PDF_LINE_HEIGHT: f32 = 8.0;

/// Which part of a record the keyword is matched against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryField {
    /// The whole record, serialized.
    #[default]
    All,
    Licensor,
    Licensee,
    ScopeOfUse,
    /// `contract_termination.termination_grounds`.
    Termination,
    GoverningLaw,
    /// Any selector name this version does not know. Projects to an
    /// empty string, so only an empty keyword matches.
    #[serde(other)]
    Unknown,
}

/// Ordering applied to the visible records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    DateDesc,
    DateAsc,
    LicensorAsc,
    LicensorDesc,
    /// Keep input order. Unrecognized sort names also land here.
    #[default]
    #[serde(rename = "none", other)]
    InputOrder,
}

/// Live query state: keyword, field selector and sort mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Case-insensitive substring; empty matches every record.
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub field: QueryField,
    #[serde(default)]
    pub sort: SortMode,
}

/// Request body for a query run, as accepted by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Records in their original (upload) order.
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub config: QueryConfig,
    /// Maximum number of visible records to return (None = unlimited).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

/// A visible record together with its position in the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMatch {
    /// 0-based index into `QueryRequest.records`.
    pub index: usize,
    pub record: Record,
}

/// Summary information for a query result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySummary {
    /// Number of records the query ran over.
    pub total_records: usize,
    /// Number of records that passed the filter, before any limit.
    pub visible_records: usize,
    /// True if `matches` was cut short by a limit.
    pub truncated: bool,
}

/// Top-level result for a query invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Schema version for this result payload.
    pub version: String,
    pub keyword: String,
    pub field: QueryField,
    pub sort: SortMode,
    /// Visible records in display order.
    #[serde(default)]
    pub matches: Vec<RecordMatch>,
    pub summary: QuerySummary,
}

/// Target representation for a single-record export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Json,
    Csv,
    PdfText,
}

impl ExportFormat {
    /// File extension used when saving a payload of this format.
    ///
    /// The PDF text layout is saved as plain text pages; turning them
    /// into an actual PDF file is the job of a rendering backend.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
            ExportFormat::PdfText => "pdf.txt",
        }
    }

    /// Download name, e.g. `modal_exported_document.csv`.
    pub fn file_name(self) -> String {
        format!("modal_exported_document.{}", self.extension())
    }
}

/// One `label: value` line of the PDF text layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PdfLine {
    pub label: String,
    pub value: String,
}

/// Serialized output of an export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum Payload {
    Json {
        text: String,
    },
    Csv {
        text: String,
    },
    PdfText {
        lines: Vec<PdfLine>,
        wrap_width: f32,
        line_height: f32,
    },
}

impl Payload {
    pub fn format(&self) -> ExportFormat {
        match self {
            Payload::Json { .. } => ExportFormat::Json,
            Payload::Csv { .. } => ExportFormat::Csv,
            Payload::PdfText { .. } => ExportFormat::PdfText,
        }
    }
}

/// Request body for an export, as accepted by the daemon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub records: Vec<Record>,
    /// 0-based index of the record to export.
    #[serde(default)]
    pub index: usize,
    pub format: ExportFormat,
}
