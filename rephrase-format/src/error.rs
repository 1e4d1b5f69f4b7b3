//! FILENAME: rephrase-format/src/error.rs

use thiserror::Error;

/// Fatal boundary failures. Shape problems inside an otherwise valid
/// document are not errors; the normalizer drops those nodes silently.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
