//! FILENAME: rephrase-format/src/lib.rs
//! Rephrase report-definition format.
//!
//! Boundary crate between stored JSON (report documents, data banks)
//! and the typed model consumed by `report-engine`. Loading is the only
//! place fatal errors exist: an unreadable file or syntactically invalid
//! JSON is reported as a `FormatError`. Everything past that point
//! follows the engine's best-effort contract - malformed nodes are
//! normalized away, never raised.

pub mod error;
pub mod parse;

use std::path::Path;

use report_engine::databank::DataBank;
use report_engine::definition::ReportDocument;

pub use error::FormatError;
pub use parse::{data_bank_from_value, document_from_value, element_from_value};

/// Parses a report document from JSON text.
pub fn parse_document(json: &str) -> Result<ReportDocument, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(parse::document_from_value(&value))
}

/// Loads a report document from a JSON file.
pub fn load_document(path: impl AsRef<Path>) -> Result<ReportDocument, FormatError> {
    let json = std::fs::read_to_string(path)?;
    parse_document(&json)
}

/// Parses a data bank from JSON text.
pub fn parse_data_bank(json: &str) -> Result<DataBank, FormatError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    Ok(parse::data_bank_from_value(&value))
}

/// Loads a data bank from a JSON file.
pub fn load_data_bank(path: impl AsRef<Path>) -> Result<DataBank, FormatError> {
    let json = std::fs::read_to_string(path)?;
    parse_data_bank(&json)
}
