//! Error types for the curvemerge library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for curvemerge operations.
///
/// Only structural failures are errors. Problems with individual records are
/// reported as [`SkippedRecord`](crate::SkippedRecord) diagnostics instead.
#[derive(Debug, Error)]
pub enum CurveMergeError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File content is not valid UTF-8.
    #[error("Invalid UTF-8 in '{path}': {source}")]
    InvalidEncoding {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    /// Top-level input is not an object with `masterLogs` and `childLogs` arrays,
    /// or a curve list file has no recognizable list of curves.
    #[error("Invalid input shape: {0}")]
    InvalidInputShape(String),

    /// Text contained no JSON array or object at all.
    #[error("No JSON content found in {0}")]
    NoJsonContent(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid merge configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to write merged output or a report.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Output format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for curvemerge operations.
pub type Result<T> = std::result::Result<T, CurveMergeError>;
