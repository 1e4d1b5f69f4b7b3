//! FILENAME: report-engine/src/engine.rs
//! Report Engine - interprets the element tree into renderable views.
//!
//! `render_element` is the single recursive entry point: the grid
//! builder re-enters it for every cell. All failure handling is by
//! omission at the smallest scope (an element, a table row, a grid
//! cell); nothing here returns an error or panics on document content.

use crate::databank::DataBank;
use crate::dates::{format_date, parse_date};
use crate::definition::{
    ChartElement, GridElement, ReportDocument, ReportElement, TableElement, TableRow,
};
use crate::palette::color_list;
use crate::timeseries::resolve_series;
use crate::view::{ChartView, GridView, ReportNode, TableView, TableViewRow};

/// Renders every top-level element of a document, in document order.
/// Unrenderable slots produce no output.
pub fn render_document(document: &ReportDocument, bank: &DataBank) -> Vec<ReportNode> {
    document
        .elements
        .iter()
        .filter_map(|slot| render_element(slot.as_ref(), bank))
        .collect()
}

/// Dispatches one element slot to its builder. A `None` slot (an
/// element dropped during normalization, or a grid index past the
/// content) yields no output.
pub fn render_element(element: Option<&ReportElement>, bank: &DataBank) -> Option<ReportNode> {
    let node = match element? {
        ReportElement::Chart(chart) => ReportNode::Chart(build_chart(chart, bank)),
        ReportElement::Table(table) => ReportNode::Table(build_table(table)),
        ReportElement::Grid(grid) => ReportNode::Grid(build_grid(grid, bank)),
        ReportElement::PageBreak => ReportNode::PageBreak,
    };
    Some(node)
}

// ============================================================================
// CHART BUILDER
// ============================================================================

/// Resolves every series slot of a chart against the data bank,
/// assigning palette colors by position.
pub fn build_chart(chart: &ChartElement, bank: &DataBank) -> ChartView {
    let colors = color_list(chart.content.len());
    let series = chart
        .content
        .iter()
        .zip(colors)
        .map(|(slot, color)| resolve_series(slot.as_ref(), bank, color))
        .collect();

    ChartView {
        title: chart.title.clone(),
        title_in_chart: chart.settings.is_title_part_of_chart,
        start_date: chart.settings.start_date.as_deref().and_then(parse_date),
        end_date: chart.settings.end_date.as_deref().and_then(parse_date),
        date_format: chart.settings.date_format.clone().unwrap_or_default(),
        series,
        classes: chart.settings.class.tags(),
        hover_decimals: crate::view::HOVER_DECIMALS,
        min_time_unit: crate::view::MIN_TIME_UNIT.to_string(),
    }
}

// ============================================================================
// TABLE BUILDER
// ============================================================================

/// Assembles header dates and body rows. Data rows whose value count
/// does not match the header date count are skipped whole; heading rows
/// are always kept.
pub fn build_table(table: &TableElement) -> TableView {
    let settings = &table.settings;

    let mut header = Vec::with_capacity(settings.dates.len() + 1);
    header.push(String::new());
    for raw in &settings.dates {
        // An unparseable header date keeps its column (body rows are
        // aligned by position) and shows the raw string.
        let cell = match parse_date(raw) {
            Some(date) => format_date(date, &settings.date_format),
            None => raw.clone(),
        };
        header.push(cell);
    }
    let span = header.len();

    let rows = table
        .content
        .iter()
        .filter_map(|row| match row {
            TableRow::Heading { title } => Some(TableViewRow::Heading {
                label: title.clone(),
                span,
            }),
            TableRow::Series { title, values } if values.len() == settings.dates.len() => {
                Some(TableViewRow::Data {
                    label: title.clone(),
                    cells: values
                        .iter()
                        .map(|v| format!("{:.*}", settings.num_decimals as usize, v))
                        .collect(),
                })
            }
            TableRow::Series { .. } => None,
        })
        .collect();

    TableView {
        title: table.title.clone(),
        header,
        rows,
        classes: settings.class.tags(),
    }
}

// ============================================================================
// GRID BUILDER
// ============================================================================

/// Lays out a row-major matrix of cells, re-entering the dispatcher for
/// each one. Indices past the content length render as empty cells.
pub fn build_grid(grid: &GridElement, bank: &DataBank) -> GridView {
    let num_rows = grid.settings.num_rows;
    let num_columns = grid.settings.num_columns;

    let mut cells = Vec::with_capacity(num_rows);
    for i in 0..num_rows {
        let mut row = Vec::with_capacity(num_columns);
        for j in 0..num_columns {
            let index = num_columns * i + j;
            let slot = grid.content.get(index).and_then(|s| s.as_ref());
            row.push(render_element(slot, bank));
        }
        cells.push(row);
    }

    GridView {
        title: grid.title.clone(),
        num_rows,
        num_columns,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::databank::{DataBankEntry, DateSpec};
    use crate::definition::{
        ChartSettings, GridSettings, InlineSeries, SeriesContent, SeriesElement, SeriesSettings,
        StyleClass, TableSettings,
    };
    use crate::palette::DEFAULT_PALETTE;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn inline_series(title: &str, dates: &[&str], values: &[f64]) -> SeriesElement {
        SeriesElement {
            title: title.to_string(),
            settings: SeriesSettings::default(),
            content: SeriesContent::Inline(InlineSeries {
                dates: dates.iter().map(|s| s.to_string()).collect(),
                values: values.to_vec(),
            }),
        }
    }

    fn table_settings(dates: &[&str]) -> TableSettings {
        TableSettings {
            dates: dates.iter().map(|s| s.to_string()).collect(),
            date_format: "%Y-%m-%d".to_string(),
            num_decimals: 2,
            class: StyleClass::default(),
        }
    }

    #[test]
    fn test_render_none_slot_is_no_output() {
        let bank = DataBank::new();
        assert_eq!(render_element(None, &bank), None);
    }

    #[test]
    fn test_render_page_break() {
        let bank = DataBank::new();
        assert_eq!(
            render_element(Some(&ReportElement::PageBreak), &bank),
            Some(ReportNode::PageBreak)
        );
    }

    #[test]
    fn test_chart_two_series_distinct_palette_colors() {
        let bank = DataBank::new();
        let chart = ChartElement {
            title: "Outlook".to_string(),
            settings: ChartSettings {
                start_date: Some("2020-01-01".to_string()),
                end_date: Some("2020-12-31".to_string()),
                date_format: Some("%Y-%m-%d".to_string()),
                ..ChartSettings::default()
            },
            content: vec![
                Some(inline_series("a", &["2020-01-01"], &[1.0])),
                Some(inline_series("b", &["2020-02-01"], &[2.0])),
            ],
        };
        let view = build_chart(&chart, &bank);
        assert_eq!(view.series.len(), 2);
        assert_eq!(view.series[0].color, DEFAULT_PALETTE[0]);
        assert_eq!(view.series[1].color, DEFAULT_PALETTE[1]);
        assert_eq!(view.start_date, Some(date(2020, 1, 1)));
        assert_eq!(view.end_date, Some(date(2020, 12, 31)));
        assert!(view.title_in_chart);
        assert_eq!(view.hover_decimals, crate::view::HOVER_DECIMALS);
        assert_eq!(view.min_time_unit, crate::view::MIN_TIME_UNIT);
    }

    #[test]
    fn test_chart_series_color_override_beats_palette() {
        let bank = DataBank::new();
        let mut series = inline_series("a", &["2020-01-01"], &[1.0]);
        series.settings.color = Some("#abcdef".to_string());
        let chart = ChartElement {
            title: String::new(),
            settings: ChartSettings::default(),
            content: vec![Some(series)],
        };
        let view = build_chart(&chart, &bank);
        assert_eq!(view.series[0].color, "#abcdef");
    }

    #[test]
    fn test_chart_failed_slot_keeps_palette_position() {
        let bank = DataBank::new();
        let chart = ChartElement {
            title: String::new(),
            settings: ChartSettings::default(),
            content: vec![None, Some(inline_series("b", &["2020-01-01"], &[1.0]))],
        };
        let view = build_chart(&chart, &bank);
        assert_eq!(view.series.len(), 2);
        assert!(view.series[0].is_empty());
        assert_eq!(view.series[1].color, DEFAULT_PALETTE[1]);
    }

    #[test]
    fn test_chart_named_series_from_bank() {
        let mut bank = DataBank::new();
        bank.insert(
            "quarterly",
            DataBankEntry {
                values: vec![5.0, 6.0],
                dates: Some(DateSpec::Start("2020-01-01".to_string())),
                frequency: Some(4),
            },
        );
        let chart = ChartElement {
            title: String::new(),
            settings: ChartSettings::default(),
            content: vec![Some(SeriesElement {
                title: "Quarterly".to_string(),
                settings: SeriesSettings::default(),
                content: SeriesContent::Named("quarterly".to_string()),
            })],
        };
        let view = build_chart(&chart, &bank);
        assert_eq!(view.series[0].points.len(), 2);
        assert_eq!(view.series[0].points[0].x, date(2020, 4, 1));
    }

    #[test]
    fn test_table_header_has_leading_blank_cell() {
        let table = TableElement {
            title: "Prices".to_string(),
            settings: table_settings(&["2020-01-01", "2020-02-01"]),
            content: Vec::new(),
        };
        let view = build_table(&table);
        assert_eq!(view.header, vec!["", "2020-01-01", "2020-02-01"]);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_table_header_formats_dates() {
        let mut settings = table_settings(&["2020-01-01"]);
        settings.date_format = "%b %Y".to_string();
        let table = TableElement {
            title: String::new(),
            settings,
            content: Vec::new(),
        };
        let view = build_table(&table);
        assert_eq!(view.header, vec!["", "Jan 2020"]);
    }

    #[test]
    fn test_table_mismatched_row_skipped_heading_kept() {
        let table = TableElement {
            title: String::new(),
            settings: table_settings(&["2020-01-01", "2020-02-01"]),
            content: vec![
                TableRow::Heading {
                    title: "Section".to_string(),
                },
                TableRow::Series {
                    title: "short".to_string(),
                    values: vec![1.0],
                },
                TableRow::Series {
                    title: "ok".to_string(),
                    values: vec![1.0, 2.0],
                },
            ],
        };
        let view = build_table(&table);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(
            view.rows[0],
            TableViewRow::Heading {
                label: "Section".to_string(),
                span: 3,
            }
        );
        match &view.rows[1] {
            TableViewRow::Data { label, cells } => {
                assert_eq!(label, "ok");
                assert_eq!(cells, &vec!["1.00".to_string(), "2.00".to_string()]);
            }
            other => panic!("expected data row, got {:?}", other),
        }
    }

    #[test]
    fn test_table_decimal_formatting() {
        let mut settings = table_settings(&["2020-01-01"]);
        settings.num_decimals = 0;
        let table = TableElement {
            title: String::new(),
            settings,
            content: vec![TableRow::Series {
                title: "r".to_string(),
                values: vec![3.6],
            }],
        };
        let view = build_table(&table);
        match &view.rows[0] {
            TableViewRow::Data { cells, .. } => assert_eq!(cells[0], "4"),
            other => panic!("expected data row, got {:?}", other),
        }
    }

    #[test]
    fn test_grid_short_content_renders_empty_cell() {
        let bank = DataBank::new();
        let grid = GridElement {
            title: String::new(),
            settings: GridSettings {
                num_rows: 2,
                num_columns: 2,
            },
            content: vec![
                Some(ReportElement::PageBreak),
                Some(ReportElement::PageBreak),
                Some(ReportElement::PageBreak),
            ],
        };
        let view = build_grid(&grid, &bank);
        assert_eq!(view.cells.len(), 2);
        assert_eq!(view.cells[0].len(), 2);
        assert!(view.cell(1, 0).is_some());
        assert_eq!(view.cell(1, 1), None);
    }

    #[test]
    fn test_grid_row_major_indexing() {
        let bank = DataBank::new();
        let table = ReportElement::Table(TableElement {
            title: "t".to_string(),
            settings: table_settings(&[]),
            content: Vec::new(),
        });
        let grid = GridElement {
            title: String::new(),
            settings: GridSettings {
                num_rows: 2,
                num_columns: 3,
            },
            // Index 4 is row 1, column 1.
            content: vec![None, None, None, None, Some(table)],
        };
        let view = build_grid(&grid, &bank);
        assert_eq!(view.cell(1, 0), None);
        assert!(matches!(view.cell(1, 1), Some(ReportNode::Table(_))));
    }

    #[test]
    fn test_grid_recurses_into_nested_grid() {
        let bank = DataBank::new();
        let inner = GridElement {
            title: String::new(),
            settings: GridSettings {
                num_rows: 1,
                num_columns: 1,
            },
            content: vec![Some(ReportElement::PageBreak)],
        };
        let outer = GridElement {
            title: String::new(),
            settings: GridSettings {
                num_rows: 1,
                num_columns: 1,
            },
            content: vec![Some(ReportElement::Grid(inner))],
        };
        let view = build_grid(&outer, &bank);
        match view.cell(0, 0) {
            Some(ReportNode::Grid(nested)) => {
                assert_eq!(nested.cell(0, 0), Some(&ReportNode::PageBreak));
            }
            other => panic!("expected nested grid, got {:?}", other),
        }
    }

    #[test]
    fn test_document_drops_invalid_slots() {
        let bank = DataBank::new();
        let document = ReportDocument {
            elements: vec![None, Some(ReportElement::PageBreak), None],
        };
        let nodes = render_document(&document, &bank);
        assert_eq!(nodes, vec![ReportNode::PageBreak]);
    }
}
