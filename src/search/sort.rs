//! Sort keys for visible records.
//!
//! Dates are compared as millisecond UTC timestamps; anything missing or
//! unparsable counts as the epoch (0). Licensor names use a
//! collation-style compare that approximates root-locale ordering
//! without an ICU dependency:
//!
//! 1. base letters, ignoring case and common Latin diacritics
//! 2. then accents
//! 3. then case, lowercase first
//! 4. then the raw string, so the order is total

use std::cmp::Ordering;

use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::parsing::Parsed;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime};

use crate::models::{Record, SortMode};

/// Sort `visible` (indices into `records`) in place according to `mode`.
///
/// Uses a stable sort over indices that start in input order, so
/// records with equal keys keep their input order for both ascending
/// and descending variants.
pub fn sort_visible(records: &[Record], visible: &mut [usize], mode: SortMode) {
    let licensor = |index: usize| records[index].licensor().unwrap_or("");

    match mode {
        SortMode::InputOrder => {}
        SortMode::DateAsc => visible.sort_by_key(|&i| effective_timestamp(&records[i])),
        SortMode::DateDesc => visible.sort_by(|&a, &b| {
            effective_timestamp(&records[b]).cmp(&effective_timestamp(&records[a]))
        }),
        SortMode::LicensorAsc => visible.sort_by(|&a, &b| locale_cmp(licensor(a), licensor(b))),
        SortMode::LicensorDesc => visible.sort_by(|&a, &b| locale_cmp(licensor(b), licensor(a))),
    }
}

/// Millisecond timestamp of the record's effective date, or 0.
pub fn effective_timestamp(record: &Record) -> i64 {
    record
        .effective_date()
        .and_then(parse_date_millis)
        .unwrap_or(0)
}

/// Parse a free-form contract date into milliseconds since the epoch.
///
/// Accepts RFC 3339 timestamps, ISO dates (optionally with a time and no
/// offset, read as UTC), slash-separated and month-name forms, and
/// partial dates such as `2024`, `2024-06` or `June 2024`, which resolve
/// to the first day of the period.
pub fn parse_date_millis(input: &str) -> Option<i64> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        return Some(unix_millis(dt));
    }

    if let Some(dt) = parse_naive_datetime(s) {
        return Some(unix_millis(dt.assume_utc()));
    }

    parse_calendar_date(s)
        .or_else(|| parse_partial_date(s))
        .map(|date| unix_millis(date.midnight().assume_utc()))
}

fn unix_millis(dt: OffsetDateTime) -> i64 {
    (dt.unix_timestamp_nanos() / 1_000_000) as i64
}

fn parse_naive_datetime(s: &str) -> Option<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        s,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
    })
    .or_else(|_| {
        PrimitiveDateTime::parse(
            s,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
        )
    })
    .ok()
}

fn parse_calendar_date(s: &str) -> Option<Date> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
        .or_else(|_| Date::parse(s, format_description!("[year]/[month]/[day]")))
        .or_else(|_| {
            Date::parse(
                s,
                format_description!(
                    "[month repr:long case_sensitive:false] [day padding:none], [year]"
                ),
            )
        })
        .or_else(|_| {
            Date::parse(
                s,
                format_description!(
                    "[month repr:short case_sensitive:false] [day padding:none], [year]"
                ),
            )
        })
        .or_else(|_| {
            Date::parse(
                s,
                format_description!(
                    "[month repr:long case_sensitive:false] [day padding:none] [year]"
                ),
            )
        })
        .or_else(|_| {
            Date::parse(
                s,
                format_description!(
                    "[month repr:short case_sensitive:false] [day padding:none] [year]"
                ),
            )
        })
        .or_else(|_| {
            Date::parse(
                s,
                format_description!(
                    "[day padding:none] [month repr:long case_sensitive:false] [year]"
                ),
            )
        })
        .or_else(|_| {
            Date::parse(
                s,
                format_description!(
                    "[day padding:none] [month repr:short case_sensitive:false] [year]"
                ),
            )
        })
        .or_else(|_| {
            Date::parse(
                s,
                format_description!("[month padding:none]/[day padding:none]/[year]"),
            )
        })
        .ok()
}

/// Year-only and year-month forms. A missing month is January and the
/// day is always the 1st.
fn parse_partial_date(s: &str) -> Option<Date> {
    let layouts: [&[BorrowedFormatItem<'_>]; 4] = [
        format_description!("[year]"),
        format_description!("[year]-[month]"),
        format_description!("[month repr:long case_sensitive:false] [year]"),
        format_description!("[month repr:short case_sensitive:false] [year]"),
    ];

    layouts.iter().find_map(|items| {
        let mut parsed = Parsed::new();
        let rest = parsed.parse_items(s.as_bytes(), items).ok()?;
        if !rest.is_empty() {
            return None;
        }
        let month = parsed.month().unwrap_or(Month::January);
        Date::from_calendar_date(parsed.year()?, month, 1).ok()
    })
}

/// Compare two strings the way a human-facing sorted list expects.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

fn primary_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        match ch {
            'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' => out.push('a'),
            'ç' | 'ć' | 'č' => out.push('c'),
            'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ę' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' | 'ī' => out.push('i'),
            'ñ' | 'ń' => out.push('n'),
            'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' | 'ū' => out.push('u'),
            'ý' | 'ÿ' => out.push('y'),
            'š' | 'ś' => out.push('s'),
            'ž' | 'ź' | 'ż' => out.push('z'),
            'ł' => out.push('l'),
            'ß' => out.push_str("ss"),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            other => out.push(other),
        }
    }
    out
}

/// Lowercase sorts before uppercase at the first case difference.
fn case_order(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        if ca == cb {
            continue;
        }
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}
