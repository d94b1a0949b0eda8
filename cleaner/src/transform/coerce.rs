//! Value coercions used by the cleaner.
//!
//! Every function here is total: a value that cannot be coerced yields a
//! fallback (`None`, `0`, `false`) instead of an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::models::Cell;

/// Date-only layouts, tried in order.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%Y%m%d",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
];

/// Date-time layouts; the time of day is kept.
pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
];

/// Years below this are read as a typo or a two-digit year and rejected.
const MIN_YEAR: i32 = 1000;

/// Parse a calendar date written without a time of day.
///
/// Accepts the layouts in [`DATE_FORMATS`]; `None` for anything else.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .filter(|date| date.year() >= MIN_YEAR)
}

/// Parse a date with a time of day.
///
/// Accepts the layouts in [`DATETIME_FORMATS`] and RFC 3339; an offset is
/// dropped and the wall-clock time kept as written.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_local()))
        .filter(|dt| dt.year() >= MIN_YEAR)
}

/// Parse a number from free text; `None` when not numeric.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| !n.is_nan())
}

/// Case-insensitive substring test.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// `YYYY-MM` label of a date.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Coerce a cell to a date or date-time cell, or [`Cell::Missing`].
pub fn coerce_date(cell: &Cell) -> Cell {
    match cell {
        Cell::Date(_) | Cell::DateTime(_) => cell.clone(),
        Cell::Text(s) => parse_date(s)
            .map(Cell::Date)
            .or_else(|| parse_datetime(s).map(Cell::DateTime))
            .unwrap_or(Cell::Missing),
        _ => Cell::Missing,
    }
}

/// Coerce a cell to a number cell, substituting `0` for anything non-numeric.
pub fn coerce_number(cell: &Cell) -> Cell {
    let value = match cell {
        Cell::Number(n) if !n.is_nan() => *n,
        Cell::Integer(i) => *i as f64,
        Cell::Text(s) => parse_number(s).unwrap_or(0.0),
        _ => 0.0,
    };
    Cell::Number(value)
}

/// Whether a cell's text contains `needle`, ignoring case. Missing is never a match.
pub fn cell_contains(cell: &Cell, needle: &str) -> bool {
    if cell.is_missing() {
        return false;
    }
    match cell.as_text() {
        Some(text) => contains_ignore_case(text, needle),
        None => contains_ignore_case(&cell.render(), needle),
    }
}
