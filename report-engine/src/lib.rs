//! FILENAME: report-engine/src/lib.rs
//! Report interpretation engine.
//!
//! Interprets a declarative report-document tree (charts, tables, grids,
//! page breaks) against a shared data bank of named time series, and
//! produces fully resolved descriptors for a rendering frontend. The
//! engine is pure and synchronous: it never mutates its inputs, performs
//! no I/O, and resolves every malformed piece of content to "no output"
//! instead of raising.
//!
//! Layers:
//! - `definition`: Typed document model (what the report IS)
//! - `databank`: Named time-series repository and frequency codes
//! - `timeseries`: Series resolution into (date, value) points
//! - `palette`: Cyclic color assignment
//! - `view`: Renderable descriptors (WHAT we display)
//! - `engine`: Recursive dispatcher and builders (HOW we resolve)

pub mod databank;
pub mod dates;
pub mod definition;
pub mod engine;
pub mod palette;
pub mod timeseries;
pub mod view;

pub use databank::{DataBank, DataBankEntry, DateSpec, PeriodUnit};
pub use definition::{
    ChartElement, ChartSettings, GridElement, GridSettings, InlineSeries, ReportDocument,
    ReportElement, SeriesContent, SeriesElement, SeriesSettings, StyleClass, TableElement,
    TableRow, TableSettings,
};
pub use engine::{build_chart, build_grid, build_table, render_document, render_element};
pub use timeseries::{resolve_series, DataPoint, ResolvedSeries, DEFAULT_RENDER_STYLE};
pub use view::{
    ChartView, GridView, ReportNode, TableView, TableViewRow, HOVER_DECIMALS, MIN_TIME_UNIT,
};
