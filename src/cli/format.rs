use std::cmp;
use std::fmt::Write as _;

use anyhow::Result;

use crate::export::pdf::{layout_pages, render_pages_text, MonospaceMeasure};
use crate::export::{text_or_na, NOT_AVAILABLE};
use crate::models::{Payload, QueryResult, Record};

/// Internal representation of a row rendered by the CLI.
///
/// Both text and table formats are derived from the same data.
struct DisplayRow {
    index: usize,
    licensor: String,
    licensee: String,
    effective_date: String,
    governing_law: String,
}

/// Render a `QueryResult` in human-readable text form.
///
/// Each visible record is rendered as:
/// `#index: licensor -> licensee (effective date)`
/// followed by a summary line when the result was truncated.
pub fn print_text(result: &QueryResult) -> Result<()> {
    print!("{}", render_text(result));
    Ok(())
}

fn render_text(result: &QueryResult) -> String {
    let mut out = String::new();

    for row in build_rows(result) {
        let _ = writeln!(
            out,
            "#{}: {} -> {} ({})",
            row.index, row.licensor, row.licensee, row.effective_date
        );
    }

    if result.summary.truncated {
        let _ = writeln!(
            out,
            "showing {} of {} matching records",
            result.matches.len(),
            result.summary.visible_records
        );
    }

    out
}

/// Render a `QueryResult` as a simple table.
///
/// Columns:
/// - INDEX
/// - LICENSOR
/// - LICENSEE
/// - EFFECTIVE DATE
/// - GOVERNING LAW
pub fn print_table(result: &QueryResult) -> Result<()> {
    print!("{}", render_table(result));
    Ok(())
}

fn render_table(result: &QueryResult) -> String {
    let rows = build_rows(result);
    let mut out = String::new();

    if rows.is_empty() {
        return out;
    }

    const MAX_PARTY_WIDTH: usize = 30;
    const MAX_LAW_WIDTH: usize = 30;

    let index_header = "INDEX";
    let licensor_header = "LICENSOR";
    let licensee_header = "LICENSEE";
    let date_header = "EFFECTIVE DATE";
    let law_header = "GOVERNING LAW";

    let max_index_len = rows
        .iter()
        .map(|r| r.index.to_string().len())
        .max()
        .unwrap_or(0);
    let max_licensor_len = rows.iter().map(|r| r.licensor.chars().count()).max().unwrap_or(0);
    let max_licensee_len = rows.iter().map(|r| r.licensee.chars().count()).max().unwrap_or(0);
    let max_date_len = rows
        .iter()
        .map(|r| r.effective_date.chars().count())
        .max()
        .unwrap_or(0);
    let max_law_len = rows
        .iter()
        .map(|r| r.governing_law.chars().count())
        .max()
        .unwrap_or(0);

    let index_width = cmp::max(index_header.len(), max_index_len);
    let licensor_width = cmp::min(
        cmp::max(licensor_header.len(), max_licensor_len),
        MAX_PARTY_WIDTH,
    );
    let licensee_width = cmp::min(
        cmp::max(licensee_header.len(), max_licensee_len),
        MAX_PARTY_WIDTH,
    );
    let date_width = cmp::max(date_header.len(), max_date_len);
    let law_width = cmp::min(cmp::max(law_header.len(), max_law_len), MAX_LAW_WIDTH);

    let header = format!(
        "{:>index_width$} {:<licensor_width$} {:<licensee_width$} {:<date_width$} {:<law_width$}",
        index_header, licensor_header, licensee_header, date_header, law_header
    );
    let _ = writeln!(out, "{}", header.trim_end());

    for row in rows {
        let line = format!(
            "{:>index_width$} {:<licensor_width$} {:<licensee_width$} {:<date_width$} {:<law_width$}",
            row.index,
            truncate(&row.licensor, licensor_width),
            truncate(&row.licensee, licensee_width),
            row.effective_date,
            truncate(&row.governing_law, law_width),
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }

    out
}

fn build_rows(result: &QueryResult) -> Vec<DisplayRow> {
    result
        .matches
        .iter()
        .map(|m| DisplayRow {
            index: m.index,
            licensor: text_or_na(m.record.licensor()),
            licensee: text_or_na(m.record.licensee()),
            effective_date: text_or_na(m.record.effective_date()),
            governing_law: text_or_na(m.record.governing_law()),
        })
        .collect()
}

/// Print the grouped "Document Details" card for one record.
pub fn print_details(record: &Record) -> Result<()> {
    print!("{}", render_details(record));
    Ok(())
}

/// Render the "Document Details" card: every group of the record under
/// its own heading, with `N/A` for anything missing.
pub fn render_details(record: &Record) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Document Details");

    section(&mut out, "Parties");
    field(&mut out, 1, "Licensor", record.licensor());
    field(&mut out, 1, "Licensee", record.licensee());

    section(&mut out, "Licensing Terms");
    field(&mut out, 1, "Effective Date", record.effective_date());
    field(&mut out, 1, "Term Duration", record.term_duration());
    let scope = record
        .scope_of_use()
        .filter(|items| !items.is_empty())
        .map(|items| items.join(", "));
    field(&mut out, 1, "Scope of Use", scope.as_deref());
    let _ = writeln!(out, "  License Characteristics:");
    field(&mut out, 2, "- Exclusivity", record.exclusivity());
    field(&mut out, 2, "- Transferability", record.transferability());
    field(&mut out, 2, "- Geographical Scope", record.geographical_scope());
    field(&mut out, 2, "- User Access", record.user_access());

    section(&mut out, "Financial Terms");
    field(&mut out, 1, "License Fee", record.license_fee());
    field(&mut out, 1, "Royalty Terms", record.royalty_terms());

    section(&mut out, "Usage Restrictions");
    bullets(&mut out, 1, record.prohibited_uses());

    section(&mut out, "Intellectual Property");
    field(&mut out, 1, "Copyright Ownership", record.copyright_ownership());
    field(
        &mut out,
        1,
        "Attribution Requirements",
        record.attribution_requirements(),
    );

    section(&mut out, "Legal Compliance");
    field(&mut out, 1, "Third Party Rights", record.third_party_rights());
    field(&mut out, 1, "Indemnification", record.indemnification());
    field(
        &mut out,
        1,
        "Liability Limitations",
        record.liability_limitations(),
    );

    section(&mut out, "Contract Termination");
    let _ = writeln!(out, "  Termination Grounds:");
    bullets(&mut out, 2, record.termination_grounds());
    let _ = writeln!(out, "  Dispute Resolution:");
    field(&mut out, 2, "- Governing Law", record.governing_law());
    field(
        &mut out,
        2,
        "- Resolution Mechanism",
        record.resolution_mechanism(),
    );

    out
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}");
}

fn field(out: &mut String, depth: usize, label: &str, value: Option<&str>) {
    let indent = "  ".repeat(depth);
    let _ = writeln!(out, "{indent}{label}: {}", text_or_na(value));
}

fn bullets(out: &mut String, depth: usize, items: Option<Vec<&str>>) {
    let indent = "  ".repeat(depth);
    match items {
        Some(items) if !items.is_empty() => {
            for item in items {
                let _ = writeln!(out, "{indent}- {item}");
            }
        }
        _ => {
            let _ = writeln!(out, "{indent}- {NOT_AVAILABLE}");
        }
    }
}

/// Render an export payload as the bytes written to stdout or to the
/// export file.
///
/// For pdf_text payloads, `layout` selects the wrapped and paginated
/// page text instead of one `label: value` line per entry.
pub fn render_payload(payload: &Payload, layout: bool) -> String {
    match payload {
        Payload::Json { text } => format!("{text}\n"),
        Payload::Csv { text } => text.clone(),
        Payload::PdfText {
            lines,
            wrap_width,
            line_height,
        } => {
            if layout {
                let pages = layout_pages(
                    lines,
                    *wrap_width,
                    *line_height,
                    &MonospaceMeasure::default(),
                );
                render_pages_text(&pages)
            } else {
                lines
                    .iter()
                    .map(|line| format!("{}: {}\n", line.label, line.value))
                    .collect()
            }
        }
    }
}

fn truncate(s: &str, max_width: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_width {
        s.to_string()
    } else if max_width <= 1 {
        "…".to_string()
    } else {
        s.chars()
            .take(max_width.saturating_sub(1))
            .collect::<String>()
            + "…"
    }
}
