//! Error types for the DataSight library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for DataSight operations.
///
/// Failures of individual model candidates are not errors: they are recorded
/// as [`crate::llm::CandidateFailure`] values and folded into the audit
/// summary.
#[derive(Debug, Error)]
pub enum DatasightError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed delimited input.
    #[error("Parse error at row {row}: {message}")]
    Parse { row: usize, message: String },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Empty file or no data to audit.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// No API credential was supplied.
    #[error("Missing credential: {0} is not set")]
    MissingCredential(String),

    /// A fix referenced a column the table does not have.
    #[error("Unknown column: '{0}'")]
    UnknownColumn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client error outside of a model call (e.g. listing models).
    #[error("HTTP error: {0}")]
    Http(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for DataSight operations.
pub type Result<T> = std::result::Result<T, DatasightError>;
