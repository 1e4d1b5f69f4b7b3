//! FILENAME: report-engine/src/dates.rs
//! Date parsing and formatting helpers.
//!
//! Input documents carry dates as strings in a handful of common shapes
//! (plain ISO date, ISO datetime, RFC 3339). Formatting uses chrono's
//! strftime patterns supplied by the document's `DateFormat` settings.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Parses a date-like string. Returns `None` for anything unparseable;
/// the caller treats that as unrenderable input.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
        return Some(datetime.date_naive());
    }
    None
}

/// Formats a date with a strftime pattern. An invalid pattern falls
/// back to the ISO form instead of panicking mid-render.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    match write!(out, "{}", date.format(pattern)) {
        Ok(()) => out,
        Err(_) => date.to_string(),
    }
}
