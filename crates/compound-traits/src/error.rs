//! Error types for trait operations.

use thiserror::Error;

/// Common error type for tabular source operations.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Requested sheet or file not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => TraitError::NotFound(e.to_string()),
            _ => TraitError::IoError(e.to_string()),
        }
    }
}
