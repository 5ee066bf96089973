//! Error types for the batch processor
//!
//! This module provides error handling for all processor operations
//! including normalization, pipeline orchestration, and output emission.

use thiserror::Error;

/// Main processor error type
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Normalization errors
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Output sink errors
    #[error("sink error: {0}")]
    Sink(#[from] SinkError),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for unexpected conditions
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Record normalization errors
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// The pet identifier field cannot be coerced to an integer.
    /// Recoverable: the pipeline may skip the record and continue.
    #[error("cannot coerce pet id {value} to an integer: {reason}")]
    TypeCoercion { value: String, reason: String },

    /// A required field is absent from the record entirely. Fatal for
    /// the whole batch: downstream stages cannot proceed without it.
    #[error("required field '{field}' is missing")]
    MissingField { field: &'static str },
}

impl NormalizeError {
    /// Whether this error must abort the whole batch
    pub fn is_fatal(&self) -> bool {
        matches!(self, NormalizeError::MissingField { .. })
    }
}

/// Output sink errors
///
/// Each variant names the dataset that failed so the caller knows which
/// of the three outputs to distrust when deciding to rerun.
#[derive(Error, Debug)]
pub enum SinkError {
    /// Persisting a dataset failed
    #[error("failed to write dataset '{dataset}': {reason}")]
    WriteFailed { dataset: &'static str, reason: String },

    /// Serializing a dataset row failed
    #[error("failed to serialize dataset '{dataset}': {source}")]
    Serialization {
        dataset: &'static str,
        source: serde_json::Error,
    },
}

impl SinkError {
    /// Name of the dataset the failure belongs to
    pub fn dataset(&self) -> &'static str {
        match self {
            SinkError::WriteFailed { dataset, .. } => dataset,
            SinkError::Serialization { dataset, .. } => dataset,
        }
    }
}

/// Result type alias for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Result type alias for normalization operations
pub type NormalizeResult<T> = std::result::Result<T, NormalizeError>;

/// Result type alias for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;

impl From<serde_json::Error> for ProcessorError {
    fn from(err: serde_json::Error) -> Self {
        ProcessorError::Serialization(err.to_string())
    }
}

impl From<anyhow::Error> for ProcessorError {
    fn from(err: anyhow::Error) -> Self {
        ProcessorError::Unexpected(err.to_string())
    }
}
