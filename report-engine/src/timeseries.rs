//! FILENAME: report-engine/src/timeseries.rs
//! Time-series resolution: turns a series element into aligned
//! (date, value) points, from inline arrays or by data-bank lookup.
//!
//! Every failure mode (missing bank entry, unusable frequency, bad start
//! date) resolves to an empty series rather than an error. The caller
//! keeps the series' slot either way, so palette positions stay stable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::databank::{DataBank, DataBankEntry, DateSpec, PeriodUnit};
use crate::dates::parse_date;
use crate::definition::{SeriesContent, SeriesElement};

/// Render style used when a series does not override it.
pub const DEFAULT_RENDER_STYLE: &str = "line";

/// One point of a resolved series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: NaiveDate,
    pub y: f64,
}

/// A fully resolved series, ready for the rendering backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSeries {
    pub label: String,
    pub color: String,
    pub render_style: String,
    pub points: Vec<DataPoint>,
}

impl ResolvedSeries {
    /// An empty series occupying a slot with the given color.
    pub fn empty(color: &str) -> Self {
        ResolvedSeries {
            label: String::new(),
            color: color.to_string(),
            render_style: DEFAULT_RENDER_STYLE.to_string(),
            points: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Resolves one series slot. A `None` slot (a content entry that failed
/// validation) contributes an empty series in the fallback color.
pub fn resolve_series(
    series: Option<&SeriesElement>,
    bank: &DataBank,
    fallback_color: &str,
) -> ResolvedSeries {
    let Some(series) = series else {
        return ResolvedSeries::empty(fallback_color);
    };

    let points = match &series.content {
        SeriesContent::Named(name) => bank
            .get(name)
            .map(resolve_bank_entry)
            .unwrap_or_default(),
        SeriesContent::Inline(inline) => {
            let dates: Vec<Option<NaiveDate>> =
                inline.dates.iter().map(|d| parse_date(d)).collect();
            pair_points(&dates, &inline.values)
        }
    };

    ResolvedSeries {
        label: series.title.clone(),
        color: series
            .settings
            .color
            .clone()
            .unwrap_or_else(|| fallback_color.to_string()),
        render_style: series
            .settings
            .render_type
            .clone()
            .unwrap_or_else(|| DEFAULT_RENDER_STYLE.to_string()),
        points,
    }
}

fn resolve_bank_entry(entry: &DataBankEntry) -> Vec<DataPoint> {
    match &entry.dates {
        Some(DateSpec::List(dates)) => {
            let parsed: Vec<Option<NaiveDate>> = dates.iter().map(|d| parse_date(d)).collect();
            pair_points(&parsed, &entry.values)
        }
        Some(DateSpec::Start(start)) => {
            let Some(unit) = entry.frequency.and_then(PeriodUnit::from_frequency) else {
                return Vec::new();
            };
            let Some(start) = parse_date(start) else {
                return Vec::new();
            };
            // The cursor moves before each point is emitted, so the first
            // point lands one period after the nominal start date.
            let mut points = Vec::with_capacity(entry.values.len());
            let mut cursor = start;
            for &value in &entry.values {
                match unit.advance(cursor) {
                    Some(next) => {
                        cursor = next;
                        points.push(DataPoint { x: cursor, y: value });
                    }
                    None => break,
                }
            }
            points
        }
        None => Vec::new(),
    }
}

/// Pairs values with their same-index dates. A date that failed to parse
/// drops only its own point; alignment of the remaining points is kept.
fn pair_points(dates: &[Option<NaiveDate>], values: &[f64]) -> Vec<DataPoint> {
    values
        .iter()
        .enumerate()
        .filter_map(|(i, &y)| {
            dates
                .get(i)
                .copied()
                .flatten()
                .map(|x| DataPoint { x, y })
        })
        .collect()
}
