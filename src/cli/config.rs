use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::cli::args::{ExportFormatArg, OutputFormat, QueryFieldArg, SortArg};
use crate::cli::{ExportArgs, QueryArgs, ServeArgs, ShowArgs};

/// Top-level representation of `.contractiq/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(default)]
    pub query: Option<QuerySection>,

    #[serde(default)]
    pub export: Option<ExportSection>,

    #[serde(default)]
    pub show: Option<ShowSection>,

    #[serde(default)]
    pub serve: Option<ServeSection>,

    #[serde(default)]
    pub http: Option<HttpSection>,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuerySection {
    #[serde(default)]
    pub records: Vec<PathBuf>,
    #[serde(default)]
    pub field: Option<QueryFieldArg>,
    #[serde(default)]
    pub sort: Option<SortArg>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub no_server: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportSection {
    #[serde(default)]
    pub records: Vec<PathBuf>,
    #[serde(default)]
    pub format: Option<ExportFormatArg>,
    #[serde(default)]
    pub layout: Option<bool>,
    #[serde(default)]
    pub out_dir: Option<PathBuf>,
    #[serde(default)]
    pub server: Option<String>,
    #[serde(default)]
    pub no_server: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShowSection {
    #[serde(default)]
    pub records: Vec<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ServeSection {
    #[serde(default)]
    pub addr: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct HttpSection {
    #[serde(default)]
    pub server_url: Option<String>,
}

/// Discover and load a project-local `.contractiq/config.toml` (or
/// `.contractiq/contractiq.toml`) starting from the current working
/// directory and walking up parent directories.
pub fn load_cli_config() -> Result<Option<CliConfig>> {
    let cwd = std::env::current_dir().context("failed to read current directory")?;
    let Some(path) = find_project_config(&cwd) else {
        return Ok(None);
    };

    debug!(path = %path.display(), "loading project config");
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config = parse_cli_config(&contents)
        .with_context(|| format!("failed to parse TOML config at {}", path.display()))?;

    Ok(Some(config))
}

fn parse_cli_config(contents: &str) -> Result<CliConfig> {
    Ok(toml::from_str(contents)?)
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(|dir| {
        let project_dir = dir.join(".contractiq");
        ["config.toml", "contractiq.toml"]
            .into_iter()
            .map(|name| project_dir.join(name))
            .find(|candidate| candidate.is_file())
    })
}

/// Global `[http] server_url`, used when a command section names no server.
fn http_server_url(config: &CliConfig) -> Option<String> {
    config.http.as_ref().and_then(|http| http.server_url.clone())
}

pub fn apply_query_config_defaults(config: &CliConfig, args: &mut QueryArgs) {
    if let Some(query) = &config.query {
        if args.records.is_empty() && !query.records.is_empty() {
            args.records = query.records.clone();
        }

        if args.field.is_none() {
            args.field = query.field;
        }

        if args.sort.is_none() {
            args.sort = query.sort;
        }

        if args.limit.is_none() {
            args.limit = query.limit;
        }

        if args.format.is_none() {
            args.format = query.format;
        }

        if args.server.is_none() {
            args.server = query.server.clone().or_else(|| http_server_url(config));
        }

        if !args.no_server {
            if let Some(true) = query.no_server {
                args.no_server = true;
            }
        }
    } else if args.server.is_none() {
        args.server = http_server_url(config);
    }
}

pub fn apply_export_config_defaults(config: &CliConfig, args: &mut ExportArgs) {
    if let Some(export) = &config.export {
        if args.records.is_empty() && !export.records.is_empty() {
            args.records = export.records.clone();
        }

        if args.format.is_none() {
            args.format = export.format;
        }

        if !args.layout {
            if let Some(true) = export.layout {
                args.layout = true;
            }
        }

        if args.out_dir.is_none() {
            args.out_dir = export.out_dir.clone();
        }

        if args.server.is_none() {
            args.server = export.server.clone().or_else(|| http_server_url(config));
        }

        if !args.no_server {
            if let Some(true) = export.no_server {
                args.no_server = true;
            }
        }
    } else if args.server.is_none() {
        args.server = http_server_url(config);
    }
}

pub fn apply_show_config_defaults(config: &CliConfig, args: &mut ShowArgs) {
    if let Some(show) = &config.show {
        if args.records.is_empty() && !show.records.is_empty() {
            args.records = show.records.clone();
        }
    }
}

pub fn apply_serve_config_defaults(config: &CliConfig, args: &mut ServeArgs) {
    if let Some(serve) = &config.serve {
        if args.addr.is_none() {
            args.addr = serve.addr.clone();
        }
    }
}
