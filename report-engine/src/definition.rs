//! FILENAME: report-engine/src/definition.rs
//! Report Definition - The typed document model.
//!
//! This module contains the types that DESCRIBE a report: a tree of
//! elements (chart, table, grid, page-break) with per-element settings
//! and content. These structures are the normalized form of the wire
//! document - the `Type` discriminator has already been matched (case
//! insensitively) and every node that survived normalization is one of
//! the closed variants below. Nodes that did not survive are carried as
//! `None` so that positional slots (grid cells, chart palette slots)
//! stay aligned with the source document.
//!
//! Wire field names are PascalCase (`StartDate`, `NumDecimals`, ...).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A report document: the ordered top-level elements as they appeared
/// in the source. `None` marks a slot whose element was unrenderable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ReportDocument {
    pub elements: Vec<Option<ReportElement>>,
}

// ============================================================================
// REPORT ELEMENT
// ============================================================================

/// One node in the report tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportElement {
    Chart(ChartElement),
    Table(TableElement),
    Grid(GridElement),
    /// Marker telling the host to force a page break when printing.
    PageBreak,
}

impl ReportElement {
    /// The lowercase discriminator this element was matched from.
    pub fn kind(&self) -> &'static str {
        match self {
            ReportElement::Chart(_) => "chart",
            ReportElement::Table(_) => "table",
            ReportElement::Grid(_) => "grid",
            ReportElement::PageBreak => "pagebreak",
        }
    }
}

// ============================================================================
// CHART
// ============================================================================

/// A chart element: chart-level settings plus an ordered list of series
/// slots. A `None` slot is a series that failed validation; it still
/// occupies its palette position and resolves to an empty series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartElement {
    pub title: String,
    pub settings: ChartSettings,
    pub content: Vec<Option<SeriesElement>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChartSettings {
    /// Lower bound of the horizontal date domain.
    #[serde(default, deserialize_with = "lenient")]
    pub start_date: Option<String>,

    /// Upper bound of the horizontal date domain.
    #[serde(default, deserialize_with = "lenient")]
    pub end_date: Option<String>,

    /// strftime-style pattern used for axis labels and tooltips.
    #[serde(default, deserialize_with = "lenient")]
    pub date_format: Option<String>,

    /// Whether the title is drawn inside the chart artifact (true) or as
    /// a separate label above it (false).
    #[serde(default = "default_true", deserialize_with = "lenient_or_true")]
    pub is_title_part_of_chart: bool,

    /// Custom style tag(s) for the outer container.
    #[serde(default, deserialize_with = "lenient")]
    pub class: StyleClass,
}

fn default_true() -> bool {
    true
}

// Optional settings fields tolerate shape mismatches: a malformed value
// falls back to the field default instead of failing the element that
// carries it. Required fields stay strict.

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

fn lenient_or_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or(true))
}

fn lenient_decimals<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_else(|_| default_decimals()))
}

impl Default for ChartSettings {
    fn default() -> Self {
        ChartSettings {
            start_date: None,
            end_date: None,
            date_format: None,
            is_title_part_of_chart: true,
            class: StyleClass::default(),
        }
    }
}

// ============================================================================
// SERIES
// ============================================================================

/// A single labeled time series, either inline or data-bank-backed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesElement {
    pub title: String,
    pub settings: SeriesSettings,
    pub content: SeriesContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct SeriesSettings {
    /// Overrides the palette color assigned by the containing chart.
    #[serde(default, deserialize_with = "lenient")]
    pub color: Option<String>,

    /// Render style override ("line", "bar", ...). Defaults to "line".
    #[serde(default, rename = "Type", deserialize_with = "lenient")]
    pub render_type: Option<String>,
}

/// Series data: a data-bank name or an inline date/value pair of arrays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesContent {
    Named(String),
    Inline(InlineSeries),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InlineSeries {
    pub dates: Vec<String>,
    pub values: Vec<f64>,
}

// ============================================================================
// TABLE
// ============================================================================

/// A table element: date columns from settings, one body row per
/// surviving content entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableElement {
    pub title: String,
    pub settings: TableSettings,
    pub content: Vec<TableRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TableSettings {
    /// Ordered date-like strings defining the column headers.
    pub dates: Vec<String>,

    /// strftime-style pattern used to format the header dates.
    pub date_format: String,

    /// Fixed decimal places for numeric cells.
    #[serde(default = "default_decimals", deserialize_with = "lenient_decimals")]
    pub num_decimals: u32,

    /// Custom style tag(s) for the table container.
    #[serde(default, deserialize_with = "lenient")]
    pub class: StyleClass,
}

fn default_decimals() -> u32 {
    2
}

/// One body row of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableRow {
    /// Full-width label spanning all date columns.
    Heading { title: String },
    /// Data row. Kept at build time only if `values` matches the header
    /// date count.
    Series { title: String, values: Vec<f64> },
}

// ============================================================================
// GRID
// ============================================================================

/// A grid element: a row-major matrix of nested element slots, logically
/// indexed `row * num_columns + col`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridElement {
    pub title: String,
    pub settings: GridSettings,
    pub content: Vec<Option<ReportElement>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GridSettings {
    pub num_rows: usize,
    pub num_columns: usize,
}

// ============================================================================
// STYLE TAGS
// ============================================================================

/// Custom style tag(s) attached to a container: a single tag or an
/// ordered list of tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleClass {
    One(String),
    Many(Vec<String>),
}

impl StyleClass {
    /// The tags as an ordered list.
    pub fn tags(&self) -> Vec<String> {
        match self {
            StyleClass::One(tag) => vec![tag.clone()],
            StyleClass::Many(tags) => tags.clone(),
        }
    }
}

impl Default for StyleClass {
    fn default() -> Self {
        StyleClass::Many(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_settings_defaults() {
        let settings: ChartSettings = serde_json::from_value(serde_json::json!({
            "StartDate": "2020-01-01",
            "EndDate": "2020-12-31"
        }))
        .unwrap();
        assert_eq!(settings.start_date.as_deref(), Some("2020-01-01"));
        assert!(settings.is_title_part_of_chart);
        assert!(settings.class.tags().is_empty());
        assert!(settings.date_format.is_none());
    }

    #[test]
    fn test_table_settings_decimal_default() {
        let settings: TableSettings = serde_json::from_value(serde_json::json!({
            "Dates": ["2020-01-01"],
            "DateFormat": "%Y-%m-%d"
        }))
        .unwrap();
        assert_eq!(settings.num_decimals, 2);
    }

    #[test]
    fn test_table_settings_zero_decimals_kept() {
        let settings: TableSettings = serde_json::from_value(serde_json::json!({
            "Dates": [],
            "DateFormat": "%Y",
            "NumDecimals": 0
        }))
        .unwrap();
        assert_eq!(settings.num_decimals, 0);
    }

    #[test]
    fn test_chart_settings_malformed_optional_fields_fall_back() {
        let settings: ChartSettings = serde_json::from_value(serde_json::json!({
            "StartDate": "2020-01-01",
            "EndDate": 42,
            "Class": 5,
            "IsTitlePartOfChart": "yes"
        }))
        .unwrap();
        assert_eq!(settings.start_date.as_deref(), Some("2020-01-01"));
        assert_eq!(settings.end_date, None);
        assert!(settings.class.tags().is_empty());
        assert!(settings.is_title_part_of_chart);
    }

    #[test]
    fn test_table_settings_malformed_decimals_fall_back() {
        let settings: TableSettings = serde_json::from_value(serde_json::json!({
            "Dates": [],
            "DateFormat": "%Y",
            "NumDecimals": "two",
            "Class": { "nested": true }
        }))
        .unwrap();
        assert_eq!(settings.num_decimals, 2);
        assert!(settings.class.tags().is_empty());
    }

    #[test]
    fn test_series_settings_malformed_color_falls_back() {
        let settings: SeriesSettings = serde_json::from_value(serde_json::json!({
            "Color": 5,
            "Type": "bar"
        }))
        .unwrap();
        assert_eq!(settings.color, None);
        assert_eq!(settings.render_type.as_deref(), Some("bar"));
    }

    #[test]
    fn test_series_content_untagged() {
        let named: SeriesContent = serde_json::from_value(serde_json::json!("gdp")).unwrap();
        assert_eq!(named, SeriesContent::Named("gdp".to_string()));

        let inline: SeriesContent = serde_json::from_value(serde_json::json!({
            "Dates": ["2020-01-01"],
            "Values": [1.5]
        }))
        .unwrap();
        match inline {
            SeriesContent::Inline(series) => {
                assert_eq!(series.dates, vec!["2020-01-01"]);
                assert_eq!(series.values, vec![1.5]);
            }
            other => panic!("expected inline content, got {:?}", other),
        }
    }

    #[test]
    fn test_series_settings_type_alias() {
        let settings: SeriesSettings = serde_json::from_value(serde_json::json!({
            "Color": "#ff0000",
            "Type": "bar"
        }))
        .unwrap();
        assert_eq!(settings.color.as_deref(), Some("#ff0000"));
        assert_eq!(settings.render_type.as_deref(), Some("bar"));
    }

    #[test]
    fn test_element_kind() {
        assert_eq!(ReportElement::PageBreak.kind(), "pagebreak");
        let grid = ReportElement::Grid(GridElement {
            title: String::new(),
            settings: GridSettings {
                num_rows: 0,
                num_columns: 0,
            },
            content: Vec::new(),
        });
        assert_eq!(grid.kind(), "grid");
    }

    #[test]
    fn test_style_class_accepts_string_or_list() {
        let one: StyleClass = serde_json::from_value(serde_json::json!("wide")).unwrap();
        assert_eq!(one.tags(), vec!["wide"]);

        let many: StyleClass =
            serde_json::from_value(serde_json::json!(["wide", "shaded"])).unwrap();
        assert_eq!(many.tags(), vec!["wide", "shaded"]);
    }
}
