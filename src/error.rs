//! Error types for plotkit
//!
//! Every failure is local and synchronous; nothing here is retried.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// plotkit error types
#[derive(Error, Debug)]
pub enum Error {
    /// Metric name is not recognized by the run logger
    #[error("{0:?} not found in RunLogger")]
    NotFound(String),

    /// Name is already registered or collides with a reserved logger name
    #[error("Attribute {0:?} already exists")]
    AlreadyExists(String),

    /// `log` was called without any metrics
    #[error("No metrics given for step {step}")]
    EmptyMetrics {
        /// Step index of the rejected call
        step: i64,
    },

    /// Snapshot is missing its `step` column
    #[error("Snapshot is missing the required \"step\" column")]
    MissingStepColumn,

    /// A metric column is not aligned with the step column
    #[error("Column {column:?} has {actual} values but the step column has {expected}")]
    ColumnLengthMismatch {
        /// Offending metric column
        column: String,
        /// Length of the step column
        expected: usize,
        /// Length of the metric column
        actual: usize,
    },

    /// Snapshot column holds something other than numbers or nulls
    #[error("Malformed snapshot column {0:?}")]
    MalformedColumn(String),

    /// Configuration rejected by a builder
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Color string could not be parsed
    #[error("Invalid color: {0:?} (expected #rrggbb)")]
    InvalidColor(String),

    /// Style sheet file does not exist
    #[error("Style sheet not found: {}", .0.display())]
    StyleNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
