//! Engine error types.

use thiserror::Error;

use compound_core::CanonicalDate;
use compound_traits::TraitError;

/// Engine error type.
///
/// Only ingestion can fail. Rejected rows and malformed query parameters are
/// handled in place and never surface as errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The tabular source could not be opened or parsed
    #[error("source unreadable: {0}")]
    SourceUnreadable(#[from] TraitError),

    /// Cross-validation against a reference series failed
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

/// Disagreement between a computed series and its reference tabulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// The two series have different lengths
    #[error("length mismatch: computed {computed} points, reference {reference}")]
    LengthMismatch {
        /// Points in the computed series.
        computed: usize,
        /// Points in the reference series.
        reference: usize,
    },

    /// The series disagree on the date at a position
    #[error("date mismatch at index {index}: computed {computed}, reference {reference}")]
    DateMismatch {
        /// Position in both series.
        index: usize,
        /// Date in the computed series.
        computed: CanonicalDate,
        /// Date in the reference series.
        reference: CanonicalDate,
    },

    /// Total returns differ by at least the tolerance
    #[error(
        "total return mismatch at index {index} ({date}): computed {computed}, reference {reference}, |diff| {diff:e} >= {epsilon:e}"
    )]
    ToleranceExceeded {
        /// Position in both series.
        index: usize,
        /// Date of the offending point.
        date: CanonicalDate,
        /// Computed total return.
        computed: f64,
        /// Reference total return.
        reference: f64,
        /// Absolute difference.
        diff: f64,
        /// Tolerance that was exceeded.
        epsilon: f64,
    },
}
