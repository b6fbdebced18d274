//! Error types for the Compound core.
//!
//! Normalization itself never fails (it returns `Option`); these errors are
//! raised by the checked constructors of the core types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The components or string do not form a valid calendar date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// The year cannot be written as four digits.
    #[error("Year {year} is outside the canonical range 0..=9999")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }
}
