//! Tabular cell values.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single cell read from a tabular source.
///
/// Spreadsheet-like sources hand back loosely typed cells: a real date, a
/// number (which may be a serial day count), free text, or nothing at all.
/// The pipeline pattern-matches on this union instead of assuming a concrete
/// file format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    /// A structured date (local calendar fields, no time zone).
    Date(NaiveDateTime),
    /// A numeric cell.
    Number(f64),
    /// A text cell.
    Text(String),
    /// A missing or blank cell.
    #[default]
    Empty,
}

impl CellValue {
    /// Shared empty cell, returned for absent columns.
    pub const EMPTY: CellValue = CellValue::Empty;

    /// Returns true for `CellValue::Empty`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Returns the text content, if this is a text cell.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the numeric content, if this is a number cell.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

impl From<chrono::NaiveDate> for CellValue {
    fn from(value: chrono::NaiveDate) -> Self {
        CellValue::Date(value.and_time(chrono::NaiveTime::MIN))
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_conversions() {
        assert_eq!(CellValue::from(1.5), CellValue::Number(1.5));
        assert_eq!(CellValue::from("n/a"), CellValue::Text("n/a".into()));
        assert_eq!(CellValue::from(None::<f64>), CellValue::Empty);

        let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let cell = CellValue::from(day);
        assert_eq!(
            cell,
            CellValue::Date(day.and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_accessors() {
        assert!(CellValue::EMPTY.is_empty());
        assert_eq!(CellValue::Text("x".into()).as_text(), Some("x"));
        assert_eq!(CellValue::Number(2.0).as_number(), Some(2.0));
        assert_eq!(CellValue::Number(2.0).as_text(), None);
    }
}
