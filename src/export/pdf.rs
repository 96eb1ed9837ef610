//! PDF text projection and the reference page layout.
//!
//! `record_to_lines` produces the ordered label/value list that makes
//! up a pdf_text payload. `layout_pages` is what a PDF backend does with
//! it: every `label: value` text is wrapped to the wrap width and placed
//! top to bottom, starting a new page when the next line would cross the
//! bottom margin. Glyph widths come from a `TextMeasure`, so a real
//! renderer can plug in its font metrics.

use std::fmt::Write as _;

use crate::export::{joined_or_na, text_or_na};
use crate::models::{PdfLine, Record};

/// Page height in layout units (A4, millimetres).
pub const PAGE_HEIGHT: f32 = 297.0;

/// Top/bottom margin and initial vertical cursor, in layout units.
pub const PAGE_MARGIN: f32 = 10.0;

/// Ordered label/value lines for `record`.
pub fn record_to_lines(record: &Record) -> Vec<PdfLine> {
    let entries = [
        ("Licensor", text_or_na(record.licensor())),
        ("Licensee", text_or_na(record.licensee())),
        ("Effective Date", text_or_na(record.effective_date())),
        ("Term Duration", text_or_na(record.term_duration())),
        ("Scope of Use", joined_or_na(record.scope_of_use(), ", ")),
        ("Exclusivity", text_or_na(record.exclusivity())),
        ("Transferability", text_or_na(record.transferability())),
        ("Geographical Scope", text_or_na(record.geographical_scope())),
        ("User Access", text_or_na(record.user_access())),
        ("License Fee", text_or_na(record.license_fee())),
        ("Royalty Terms", text_or_na(record.royalty_terms())),
        ("Indemnification", text_or_na(record.indemnification())),
        (
            "Liability Limitations",
            text_or_na(record.liability_limitations()),
        ),
        (
            "Termination Grounds",
            joined_or_na(record.termination_grounds(), " | "),
        ),
        ("Governing Law", text_or_na(record.governing_law())),
        (
            "Resolution Mechanism",
            text_or_na(record.resolution_mechanism()),
        ),
        (
            "Attribution Requirements",
            text_or_na(record.attribution_requirements()),
        ),
    ];

    entries
        .into_iter()
        .map(|(label, value)| PdfLine {
            label: label.to_string(),
            value,
        })
        .collect()
}

/// Width of a run of text in layout units.
pub trait TextMeasure {
    fn width(&self, text: &str) -> f32;
}

/// Every character advances by the same amount.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasure {
    pub char_width: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self { char_width: 2.5 }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

/// A single wrapped line placed on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    /// Baseline position from the top of the page.
    pub y: f32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Wrap and paginate `lines` the way the PDF export lays them out.
pub fn layout_pages(
    lines: &[PdfLine],
    wrap_width: f32,
    line_height: f32,
    measure: &dyn TextMeasure,
) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut current = Page::default();
    let mut y = PAGE_MARGIN;

    for line in lines {
        let text = format!("{}: {}", line.label, line.value);
        for chunk in split_to_width(&text, wrap_width, measure) {
            if y + line_height > PAGE_HEIGHT - PAGE_MARGIN {
                pages.push(std::mem::take(&mut current));
                y = PAGE_MARGIN;
            }
            current.lines.push(PlacedLine { y, text: chunk });
            y += line_height;
        }
    }

    pages.push(current);
    pages
}

/// Greedy word wrap. Words wider than `width` on their own are split
/// between characters; explicit line breaks are kept.
pub fn split_to_width(text: &str, width: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut out = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };

            if measure.width(&candidate) <= width {
                line = candidate;
                continue;
            }

            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
            }

            if measure.width(word) <= width {
                line = word.to_string();
            } else {
                for ch in word.chars() {
                    line.push(ch);
                    if measure.width(&line) > width && line.chars().count() > 1 {
                        line.pop();
                        out.push(std::mem::replace(&mut line, ch.to_string()));
                    }
                }
            }
        }

        out.push(line);
    }

    out
}

/// Plain-text rendering of laid-out pages, one block per page.
pub fn render_pages_text(pages: &[Page]) -> String {
    let mut out = String::new();
    for (idx, page) in pages.iter().enumerate() {
        let _ = writeln!(out, "--- page {} ---", idx + 1);
        for line in &page.lines {
            let _ = writeln!(out, "{}", line.text);
        }
    }
    out
}
