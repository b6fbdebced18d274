//! Normalized and compounded observations.

use serde::{Deserialize, Serialize};

use super::CanonicalDate;

/// One validated row: a canonical date and its daily return in percent.
///
/// `daily_return_percent` is always finite; the row extractor rejects
/// anything else before a point is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPoint {
    /// Observation date.
    pub date: CanonicalDate,
    /// Daily return as a percentage (`1.5` = +1.5%).
    pub daily_return_percent: f64,
}

impl NormalizedPoint {
    /// Creates a normalized point.
    #[must_use]
    pub fn new(date: CanonicalDate, daily_return_percent: f64) -> Self {
        Self {
            date,
            daily_return_percent,
        }
    }
}

/// A compounded observation of the total-return series.
///
/// `total_return` is the cumulative return since the start of the series,
/// expressed as a fraction of a unit base (`0.045` = +4.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Observation date.
    pub date: CanonicalDate,
    /// Daily return as a percentage.
    pub daily_return_percent: f64,
    /// Cumulative compounded return as of `date`.
    pub total_return: f64,
}

impl SeriesPoint {
    /// Growth multiplier implied by this point (`1 + total_return`).
    #[must_use]
    pub fn growth(&self) -> f64 {
        1.0 + self.total_return
    }
}
