//! Server error types.

use thiserror::Error;

use compound_engine::EngineError;
use compound_traits::TraitError;

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Reading a file or binding the listener failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`crate::ServerConfig`]
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// The workbook could not be opened
    #[error("workbook unavailable: {0}")]
    Source(#[from] TraitError),

    /// Building the series store failed
    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result type for server setup.
pub type ServerResult<T> = Result<T, ServerError>;
