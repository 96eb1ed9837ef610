use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Deserialize;

use crate::models::{ExportFormat, QueryConfig, QueryField, QueryRequest, Record, SortMode};

/// Top-level CLI entrypoint for `contractiq`.
#[derive(Parser, Debug)]
#[command(
    name = "contractiq",
    about = "Query and export extracted contract metadata",
    author = "contractiq developers",
    subcommand_required = false,
    arg_required_else_help = false
)]
pub struct Cli {
    /// Print the JSON schema version used for `--format=json` query
    /// output and exit.
    #[arg(long = "schema-version")]
    pub schema_version: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter and sort records by keyword, field and sort mode.
    Query(QueryArgs),
    /// Export a single record as JSON, CSV or PDF text.
    Export(ExportArgs),
    /// Print the full details card for a single record.
    Show(ShowArgs),
    /// Run a long-lived HTTP+JSON daemon.
    Serve(ServeArgs),
}

/// Arguments specific to the `query` subcommand.
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Case-insensitive keyword; omit to list every record.
    #[arg(default_value = "")]
    pub keyword: String,

    /// Record files or directories of `*.json` record files.
    #[arg(short = 'r', long = "records")]
    pub records: Vec<PathBuf>,

    /// Record field the keyword is matched against [default: all].
    #[arg(long = "field", value_enum)]
    pub field: Option<QueryFieldArg>,

    /// Ordering of the visible records [default: none].
    #[arg(long = "sort", value_enum)]
    pub sort: Option<SortArg>,

    /// Maximum number of records to return.
    #[arg(long = "limit")]
    pub limit: Option<usize>,

    /// Output format (text, table, or json) [default: text].
    #[arg(long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Optional server URL for delegating the query to a daemon.
    ///
    /// When set (either via this flag or the `CONTRACTIQ_SERVER_URL`
    /// environment variable), the CLI sends the loaded records and
    /// query configuration to the HTTP server instead of evaluating
    /// locally. Use `--no-server` to force local execution.
    #[arg(long = "server", env = "CONTRACTIQ_SERVER_URL")]
    pub server: Option<String>,

    /// Disable use of any configured server and force local evaluation.
    #[arg(long = "no-server")]
    pub no_server: bool,
}

/// Arguments specific to the `export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Record files or directories of `*.json` record files.
    #[arg(short = 'r', long = "records")]
    pub records: Vec<PathBuf>,

    /// 0-based position of the record to export among the loaded records.
    #[arg(long = "index", default_value_t = 0)]
    pub index: usize,

    /// Export format (json, csv, or pdf-text) [default: json].
    #[arg(long = "format", value_enum)]
    pub format: Option<ExportFormatArg>,

    /// For pdf-text, print the wrapped and paginated pages instead of
    /// the raw label/value lines.
    #[arg(long = "layout")]
    pub layout: bool,

    /// Write `modal_exported_document.<ext>` into this directory instead
    /// of printing the payload.
    #[arg(long = "out-dir")]
    pub out_dir: Option<PathBuf>,

    /// Optional server URL for delegating the export to a daemon.
    #[arg(long = "server", env = "CONTRACTIQ_SERVER_URL")]
    pub server: Option<String>,

    /// Disable use of any configured server and force local export.
    #[arg(long = "no-server")]
    pub no_server: bool,
}

/// Arguments specific to the `show` subcommand.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Record files or directories of `*.json` record files.
    #[arg(short = 'r', long = "records")]
    pub records: Vec<PathBuf>,

    /// 0-based position of the record to show among the loaded records.
    #[arg(long = "index", default_value_t = 0)]
    pub index: usize,
}

/// Arguments specific to the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to bind the HTTP server to [default: 127.0.0.1:7979].
    #[arg(long = "addr")]
    pub addr: Option<String>,
}

pub const DEFAULT_SERVE_ADDR: &str = "127.0.0.1:7979";

// Defaulted flags stay `None` until the project config has been applied.

impl QueryArgs {
    pub fn field(&self) -> QueryFieldArg {
        self.field.unwrap_or_default()
    }

    pub fn sort(&self) -> SortArg {
        self.sort.unwrap_or_default()
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }
}

impl ExportArgs {
    pub fn export_format(&self) -> ExportFormat {
        self.format.unwrap_or_default().to_model()
    }
}

impl ServeArgs {
    pub fn addr(&self) -> &str {
        self.addr.as_deref().unwrap_or(DEFAULT_SERVE_ADDR)
    }
}

/// CLI representation of the query field selector.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryFieldArg {
    #[default]
    All,
    Licensor,
    Licensee,
    #[value(name = "scope_of_use")]
    ScopeOfUse,
    Termination,
    #[value(name = "governing_law")]
    GoverningLaw,
}

impl QueryFieldArg {
    pub fn to_model(self) -> QueryField {
        match self {
            QueryFieldArg::All => QueryField::All,
            QueryFieldArg::Licensor => QueryField::Licensor,
            QueryFieldArg::Licensee => QueryField::Licensee,
            QueryFieldArg::ScopeOfUse => QueryField::ScopeOfUse,
            QueryFieldArg::Termination => QueryField::Termination,
            QueryFieldArg::GoverningLaw => QueryField::GoverningLaw,
        }
    }
}

/// CLI representation of the sort mode.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortArg {
    #[default]
    None,
    #[value(name = "date_desc")]
    DateDesc,
    #[value(name = "date_asc")]
    DateAsc,
    #[value(name = "licensor_asc")]
    LicensorAsc,
    #[value(name = "licensor_desc")]
    LicensorDesc,
}

impl SortArg {
    pub fn to_model(self) -> SortMode {
        match self {
            SortArg::None => SortMode::InputOrder,
            SortArg::DateDesc => SortMode::DateDesc,
            SortArg::DateAsc => SortMode::DateAsc,
            SortArg::LicensorAsc => SortMode::LicensorAsc,
            SortArg::LicensorDesc => SortMode::LicensorDesc,
        }
    }
}

/// CLI representation of output format.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

/// CLI representation of export format.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExportFormatArg {
    #[default]
    Json,
    Csv,
    PdfText,
}

impl ExportFormatArg {
    pub fn to_model(self) -> ExportFormat {
        match self {
            ExportFormatArg::Json => ExportFormat::Json,
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::PdfText => ExportFormat::PdfText,
        }
    }
}

/// Fail early when no record source was given on the command line or
/// in the project config.
pub fn require_record_paths(paths: &[PathBuf]) -> Result<()> {
    if paths.is_empty() {
        bail!(
            "no record files given; pass --records <FILE> or set `records` in .contractiq/config.toml"
        );
    }
    Ok(())
}

/// Build a core `QueryConfig` from CLI `QueryArgs`.
pub fn query_config_from_args(args: &QueryArgs) -> QueryConfig {
    QueryConfig {
        keyword: args.keyword.clone(),
        field: args.field().to_model(),
        sort: args.sort().to_model(),
    }
}

/// Build a `QueryRequest` over already-loaded records.
pub fn query_request_from_args(args: &QueryArgs, records: Vec<Record>) -> QueryRequest {
    QueryRequest {
        records,
        config: query_config_from_args(args),
        limit: args.limit,
    }
}
