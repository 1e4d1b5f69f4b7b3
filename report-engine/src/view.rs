//! FILENAME: report-engine/src/view.rs
//! Report View - Renderable descriptors for the host frontend.
//!
//! These are the fully resolved structures handed to the rendering
//! backend (charts) and host UI toolkit (tables, grids, page breaks).
//! No data-bank names, frequency codes, or raw date strings survive to
//! this layer; everything is parsed, formatted, and color-assigned.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::timeseries::ResolvedSeries;

/// Decimal digits shown in interactive hover/inspection labels.
pub const HOVER_DECIMALS: u32 = 3;

/// Minimum displayed granularity of the chart's time axis.
pub const MIN_TIME_UNIT: &str = "day";

/// One resolved node of the report tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportNode {
    Chart(ChartView),
    Table(TableView),
    Grid(GridView),
    PageBreak,
}

// ============================================================================
// CHART
// ============================================================================

/// A chart descriptor: resolved series plus axis and title directives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartView {
    /// Chart title; empty means no title is shown.
    pub title: String,

    /// True: draw the title inside the chart artifact. False: the host
    /// places it as a separate label above the chart.
    pub title_in_chart: bool,

    /// Horizontal domain bounds. `None` leaves that end unbounded.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,

    /// strftime-style pattern for axis labels and tooltips; empty means
    /// the backend default.
    pub date_format: String,

    /// Resolved series, one per content slot, palette-colored in order.
    pub series: Vec<ResolvedSeries>,

    /// Custom style tags for the outer container.
    pub classes: Vec<String>,

    /// Decimal digits for hover/inspection labels. Fixed at
    /// [`HOVER_DECIMALS`]; serialized so the backend needs no shared
    /// constant.
    pub hover_decimals: u32,

    /// Minimum displayed granularity of the time axis. Fixed at
    /// [`MIN_TIME_UNIT`].
    pub min_time_unit: String,
}

// ============================================================================
// TABLE
// ============================================================================

/// A table descriptor: formatted header plus body rows. Always carries
/// a header and body, even when the body ends up empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    /// Table title; empty means no title row is shown.
    pub title: String,

    /// Header cells: one blank row-label cell followed by one formatted
    /// date per column.
    pub header: Vec<String>,

    pub rows: Vec<TableViewRow>,

    /// Custom style tags for the table container.
    pub classes: Vec<String>,
}

impl TableView {
    /// Total column count, including the row-label column.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// One body row of a rendered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TableViewRow {
    /// Label spanning `span` columns (all date columns plus the label
    /// column).
    Heading { label: String, span: usize },
    /// Label cell plus one pre-formatted cell per date column.
    Data { label: String, cells: Vec<String> },
}

// ============================================================================
// GRID
// ============================================================================

/// A grid descriptor: row-major matrix of resolved cells. `None` cells
/// render empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridView {
    /// Grid title; empty means no title is shown.
    pub title: String,

    pub num_rows: usize,
    pub num_columns: usize,

    /// `cells[row][col]`, sized `num_rows` x `num_columns`.
    pub cells: Vec<Vec<Option<ReportNode>>>,
}

impl GridView {
    /// The resolved node at `(row, col)`, if any.
    pub fn cell(&self, row: usize, col: usize) -> Option<&ReportNode> {
        self.cells.get(row).and_then(|r| r.get(col)).and_then(|c| c.as_ref())
    }
}
