//! Reference Validator.
//!
//! Cross-checks a computed series against an independently tabulated
//! total-return column for the same dataset. The reference rows go through
//! the same date normalization, finite-value filter and stable date sort as
//! the raw rows, so the two sequences line up index by index.
//!
//! The tolerance absorbs floating-point divergence between two independent
//! computation paths. It is not a production accuracy guarantee.

use serde::{Deserialize, Serialize};

use compound_core::{normalize_date, CanonicalDate, DateSystem};
use compound_traits::{RawRow, TableSource};

use crate::error::{EngineError, ValidationError};
use crate::extract::{coerce_number, DEFAULT_DATE_COLUMN};
use crate::series::Series;

/// Number of leading points compared by default.
pub const DEFAULT_COMPARE_FIRST: usize = 50;

/// Default absolute tolerance on total returns.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Where to find the reference tabulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceSpec {
    /// Sheet holding the reference series.
    pub sheet: String,
    /// Column holding the date.
    pub date_column: String,
    /// Column holding the cumulative total return (a fraction).
    pub total_return_column: String,
    /// Epoch convention for serial dates.
    pub date_system: DateSystem,
}

impl Default for ReferenceSpec {
    fn default() -> Self {
        Self {
            sheet: "totalreturn".to_string(),
            date_column: DEFAULT_DATE_COLUMN.to_string(),
            total_return_column: "Total Return".to_string(),
            date_system: DateSystem::default(),
        }
    }
}

/// One row of the reference tabulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencePoint {
    /// Observation date.
    pub date: CanonicalDate,
    /// Cumulative total return as tabulated.
    pub total_return: f64,
}

/// Outcome of a successful cross-validation.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ValidationReport {
    /// Number of leading points that were compared.
    pub compared: usize,
    /// Largest absolute difference seen.
    pub max_abs_diff: f64,
    /// Date at which the largest difference occurred.
    pub max_diff_date: Option<CanonicalDate>,
}

/// Projects reference rows onto date-sorted [`ReferencePoint`]s.
///
/// Rows without a usable date or a finite total return are skipped.
pub fn reference_points<I>(rows: I, spec: &ReferenceSpec) -> Vec<ReferencePoint>
where
    I: IntoIterator,
    I::Item: RawRow,
{
    let mut points: Vec<ReferencePoint> = rows
        .into_iter()
        .filter_map(|row| {
            let date = normalize_date(row.cell(&spec.date_column), spec.date_system)?;
            let total_return = coerce_number(row.cell(&spec.total_return_column)).ok()?;
            Some(ReferencePoint { date, total_return })
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

/// Reads the reference sheet from `source`.
///
/// # Errors
///
/// Returns `EngineError::SourceUnreadable` if the sheet cannot be read.
pub fn read_reference_series(
    source: &dyn TableSource,
    spec: &ReferenceSpec,
) -> Result<Vec<ReferencePoint>, EngineError> {
    let rows = source.read_table(&spec.sheet)?;
    Ok(reference_points(&rows, spec))
}

/// Compares the first `compare_first` points of two series.
///
/// Lengths must match exactly. For each compared index the dates must be
/// equal and `|computed - reference| < epsilon`.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn cross_validate(
    computed: &Series,
    reference: &[ReferencePoint],
    compare_first: usize,
    epsilon: f64,
) -> Result<ValidationReport, ValidationError> {
    if computed.len() != reference.len() {
        return Err(ValidationError::LengthMismatch {
            computed: computed.len(),
            reference: reference.len(),
        });
    }

    let mut report = ValidationReport::default();

    for (index, (ours, theirs)) in computed
        .iter()
        .zip(reference)
        .take(compare_first)
        .enumerate()
    {
        if ours.date != theirs.date {
            return Err(ValidationError::DateMismatch {
                index,
                computed: ours.date.clone(),
                reference: theirs.date.clone(),
            });
        }

        let diff = (ours.total_return - theirs.total_return).abs();
        if diff.is_nan() || diff >= epsilon {
            return Err(ValidationError::ToleranceExceeded {
                index,
                date: ours.date.clone(),
                computed: ours.total_return,
                reference: theirs.total_return,
                diff,
                epsilon,
            });
        }

        if report.max_diff_date.is_none() || diff > report.max_abs_diff {
            report.max_abs_diff = diff;
            report.max_diff_date = Some(ours.date.clone());
        }
        report.compared += 1;
    }

    Ok(report)
}
