//! Canonical date type for the series.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A calendar date in its canonical `YYYY-MM-DD` form.
///
/// The representation is a fixed-width, zero-padded string, so the derived
/// `Ord` (lexicographic) agrees with chronological order. Values can only be
/// built from valid calendar components, which keeps the pattern invariant.
///
/// # Example
///
/// ```rust
/// use compound_core::types::CanonicalDate;
///
/// let date = CanonicalDate::from_ymd(1990, 1, 2).unwrap();
/// assert_eq!(date.as_str(), "1990-01-02");
/// assert!(date < CanonicalDate::from_ymd(1990, 1, 10).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalDate(String);

impl CanonicalDate {
    /// Creates a canonical date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the components do not form a
    /// calendar date, or `CoreError::YearOutOfRange` if the year needs more
    /// than four digits.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))?;
        Self::from_naive(date)
    }

    /// Creates a canonical date from a `chrono::NaiveDate`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::YearOutOfRange` for years outside `0..=9999`.
    pub fn from_naive(date: NaiveDate) -> CoreResult<Self> {
        let year = date.year();
        if !(0..=9999).contains(&year) {
            return Err(CoreError::YearOutOfRange { year });
        }
        Ok(Self(format!(
            "{year:04}-{:02}-{:02}",
            date.month(),
            date.day()
        )))
    }

    /// Parses a strict `YYYY-MM-DD` string.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not exactly ten
    /// characters in canonical form or names an impossible date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(CoreError::invalid_date(format!("Cannot parse: {s}")));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
            .and_then(Self::from_naive)
    }

    /// Returns the canonical string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the date as a `chrono::NaiveDate`.
    #[must_use]
    pub fn to_naive_date(&self) -> NaiveDate {
        // The string was produced from a valid NaiveDate.
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").unwrap_or_default()
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalDate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for CanonicalDate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CanonicalDate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl TryFrom<String> for CanonicalDate {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CanonicalDate> for String {
    fn from(date: CanonicalDate) -> Self {
        date.0
    }
}
