//! FILENAME: rephrase-format/src/parse.rs
//! Normalization from loosely-typed JSON into the typed report model.
//!
//! This is where the permissive input contract is enforced, exactly
//! once: `Type` discriminators are matched case-insensitively, unknown
//! or malformed nodes are dropped, and positional slots (grid cells,
//! chart series) keep their place as `None` so downstream layout is
//! unaffected. Dropped nodes are noted at debug level only; the engine
//! itself stays silent.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use report_engine::databank::{DataBank, DataBankEntry};
use report_engine::definition::{
    ChartElement, ChartSettings, GridElement, GridSettings, ReportDocument, ReportElement,
    SeriesContent, SeriesElement, SeriesSettings, TableElement, TableRow, TableSettings,
};

/// Normalizes a whole document: a JSON array of elements, or a single
/// element object.
pub fn document_from_value(value: &Value) -> ReportDocument {
    let elements = match value {
        Value::Array(items) => items.iter().map(element_from_value).collect(),
        Value::Object(_) => vec![element_from_value(value)],
        _ => Vec::new(),
    };
    ReportDocument { elements }
}

/// Normalizes one report element. Anything that is not an object with a
/// recognized `Type` becomes `None`.
pub fn element_from_value(value: &Value) -> Option<ReportElement> {
    let obj = value.as_object()?;
    let kind = obj.get("Type")?.as_str()?.to_ascii_lowercase();
    let element = match kind.as_str() {
        "chart" => ReportElement::Chart(chart_from_object(obj)?),
        "table" => ReportElement::Table(table_from_object(obj)?),
        "grid" => ReportElement::Grid(grid_from_object(obj)?),
        "pagebreak" => ReportElement::PageBreak,
        other => {
            log::debug!("dropping report element with unrecognized Type {:?}", other);
            return None;
        }
    };
    Some(element)
}

fn chart_from_object(obj: &Map<String, Value>) -> Option<ChartElement> {
    let settings: ChartSettings = settings_of(obj)?;
    // A chart without content is still a chart; it just has no series.
    let content = match obj.get("Content").and_then(Value::as_array) {
        Some(items) => items.iter().map(series_from_value).collect(),
        None => Vec::new(),
    };
    Some(ChartElement {
        title: title_of(obj),
        settings,
        content,
    })
}

fn table_from_object(obj: &Map<String, Value>) -> Option<TableElement> {
    let settings: TableSettings = settings_of(obj)?;
    let content = match obj.get("Content").and_then(Value::as_array) {
        Some(items) => items.iter().filter_map(table_row_from_value).collect(),
        None => Vec::new(),
    };
    Some(TableElement {
        title: title_of(obj),
        settings,
        content,
    })
}

fn grid_from_object(obj: &Map<String, Value>) -> Option<GridElement> {
    let settings: GridSettings = settings_of(obj)?;
    let content = match obj.get("Content").and_then(Value::as_array) {
        Some(items) => items.iter().map(element_from_value).collect(),
        None => Vec::new(),
    };
    Some(GridElement {
        title: title_of(obj),
        settings,
        content,
    })
}

/// Normalizes one chart series entry. Requires `Type == "series"` and a
/// content that is a data-bank name or an inline Dates/Values object.
pub fn series_from_value(value: &Value) -> Option<SeriesElement> {
    let obj = value.as_object()?;
    if !obj.get("Type")?.as_str()?.eq_ignore_ascii_case("series") {
        return None;
    }
    let content: SeriesContent = serde_json::from_value(obj.get("Content")?.clone()).ok()?;
    // Series settings are optional and tolerated when malformed.
    let settings = obj
        .get("Settings")
        .and_then(|s| serde_json::from_value::<SeriesSettings>(s.clone()).ok())
        .unwrap_or_default();
    Some(SeriesElement {
        title: title_of(obj),
        settings,
        content,
    })
}

/// Normalizes one table row. Data rows need a numeric `Content.Values`
/// array; heading rows need nothing beyond their type.
fn table_row_from_value(value: &Value) -> Option<TableRow> {
    let obj = value.as_object()?;
    let kind = obj.get("Type")?.as_str()?.to_ascii_lowercase();
    match kind.as_str() {
        "heading" => Some(TableRow::Heading {
            title: title_of(obj),
        }),
        "series" => {
            let values = obj.get("Content")?.get("Values")?.as_array()?;
            let values: Option<Vec<f64>> = values.iter().map(Value::as_f64).collect();
            Some(TableRow::Series {
                title: title_of(obj),
                values: values?,
            })
        }
        _ => None,
    }
}

/// Normalizes a data bank: a JSON object mapping series names to
/// entries. Entries that do not deserialize are omitted, so lookups
/// against them miss.
pub fn data_bank_from_value(value: &Value) -> DataBank {
    let mut bank = DataBank::new();
    if let Some(entries) = value.as_object() {
        for (name, entry) in entries {
            match serde_json::from_value::<DataBankEntry>(entry.clone()) {
                Ok(entry) => bank.insert(name.clone(), entry),
                Err(err) => log::debug!("dropping data-bank entry {:?}: {}", name, err),
            }
        }
    }
    bank
}

fn title_of(obj: &Map<String, Value>) -> String {
    obj.get("Title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn settings_of<T: DeserializeOwned>(obj: &Map<String, Value>) -> Option<T> {
    serde_json::from_value(obj.get("Settings")?.clone()).ok()
}
