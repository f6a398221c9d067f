//! Parser error types.

use thiserror::Error;

/// Errors that can occur while loading a build log.
///
/// Normalization itself never fails; these cover reading the document and
/// turning its text into JSON.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("JSON parse error: {0}")]
    JsonError(String),

    #[error("Log file too large: {size_mb} MB exceeds the {limit_mb} MB limit")]
    TooLarge { size_mb: u64, limit_mb: u64 },
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ParseError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}
