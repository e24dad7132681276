//! Ingestion error types.

use thiserror::Error;

/// Errors that can occur while reading or normalizing tabular input.
///
/// All of these describe the shape of user-supplied input; none are
/// transient, so nothing here is ever retried. The caller is expected to
/// surface the message and stop pipeline execution.
#[derive(Debug, Error)]
pub enum IngestError {
    /// A local input file was not found or unreadable.
    #[error("File not found: {0} ({1})")]
    FileNotFound(String, String),

    /// The file extension maps to no supported container format.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Text decoding failed under every attempted encoding.
    #[error("Decode failure: {0}")]
    Decode(String),

    /// The container is structurally malformed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required column is missing from the input.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// No data rows survived parsing.
    #[error("Empty data")]
    Empty,
}
