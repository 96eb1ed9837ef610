//! Loading records from JSON documents on disk.
//!
//! A record file holds either one record object or an array of them.
//! Extraction-model responses are often wrapped in a markdown code fence
//! (```` ```json ... ``` ````); the fence is stripped before parsing.
//! Directories are expanded to their `*.json` files in name order.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::{debug, warn};

use crate::models::Record;

/// Load records from every path, preserving path order and the order
/// of records within each file.
pub fn load_records(paths: &[PathBuf]) -> Result<Vec<Record>> {
    let mut records = Vec::new();

    for path in paths {
        if path.is_dir() {
            for file in json_files_in(path)? {
                records.extend(load_file(&file)?);
            }
        } else {
            records.extend(load_file(path)?);
        }
    }

    debug!(files = paths.len(), records = records.len(), "records loaded");
    Ok(records)
}

fn load_file(path: &Path) -> Result<Vec<Record>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read record file at {}", path.display()))?;
    parse_records(&contents)
        .with_context(|| format!("failed to parse records in {}", path.display()))
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)
        .with_context(|| format!("failed to read record directory {}", dir.display()))?
    {
        let path = entry?.path();
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        if path.is_file() && is_json {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Parse the contents of one record document.
pub fn parse_records(contents: &str) -> Result<Vec<Record>> {
    let body = strip_markdown_fence(contents);
    let value: Value = serde_json::from_str(body).context("record document is not valid JSON")?;

    match value {
        Value::Object(_) => Ok(vec![serde_json::from_value(value)?]),
        Value::Array(items) => {
            let mut records = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                if item.is_object() {
                    records.push(serde_json::from_value(item)?);
                } else {
                    warn!(position = idx, "skipping array entry that is not a record object");
                }
            }
            Ok(records)
        }
        other => bail!(
            "expected a record object or an array of records, found {}",
            json_kind(&other)
        ),
    }
}

/// Remove a surrounding ```` ```json ```` / ```` ``` ```` fence, if any.
pub fn strip_markdown_fence(contents: &str) -> &str {
    let trimmed = contents.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string (e.g. `json`) on the opening line.
    let inner = match inner.find('\n') {
        Some(pos) if !inner[..pos].trim_start().starts_with(['{', '[']) => &inner[pos + 1..],
        _ => inner,
    };
    inner.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
