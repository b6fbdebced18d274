//! Tabular source traits.
//!
//! A tabular source is anything that can hand back the rows of a named
//! sheet: a directory of CSV exports, a JSON document, an in-memory fixture.
//! Rows are only reachable through named-field lookup, so the pipeline never
//! depends on a concrete container format.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use compound_core::CellValue;

use crate::error::TraitError;

/// Returned for columns a row does not have.
static EMPTY_CELL: CellValue = CellValue::Empty;

/// Named-field access to one record of a table.
pub trait RawRow {
    /// Returns the cell stored under `column`, or `CellValue::Empty` if the
    /// row has no such column.
    fn cell(&self, column: &str) -> &CellValue;
}

impl<R: RawRow + ?Sized> RawRow for &R {
    fn cell(&self, column: &str) -> &CellValue {
        (**self).cell(column)
    }
}

impl RawRow for HashMap<String, CellValue> {
    fn cell(&self, column: &str) -> &CellValue {
        self.get(column).unwrap_or(&EMPTY_CELL)
    }
}

impl RawRow for BTreeMap<String, CellValue> {
    fn cell(&self, column: &str) -> &CellValue {
        self.get(column).unwrap_or(&EMPTY_CELL)
    }
}

/// A row as produced by the bundled sources: cells in header order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableRow {
    cells: Vec<(String, CellValue)>,
}

impl TableRow {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell (builder style).
    pub fn with_cell(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.push(column, value);
        self
    }

    /// Append a cell.
    pub fn push(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.cells.push((column.into(), value.into()));
    }

    /// Number of cells in the row.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether every cell is blank.
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|(_, v)| v.is_empty())
    }

    /// Iterate over `(column, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl RawRow for TableRow {
    fn cell(&self, column: &str) -> &CellValue {
        // Duplicate headers: the first column wins.
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map_or(&EMPTY_CELL, |(_, value)| value)
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for TableRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            cells: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A source of named tables ("sheets").
///
/// Reads are synchronous and happen once, at startup; a failing read is
/// fatal to the caller.
pub trait TableSource: Send + Sync {
    /// Read every data row of `sheet`, in source order.
    ///
    /// # Errors
    ///
    /// Returns `TraitError::NotFound` if the sheet does not exist, or an
    /// IO/parse error if it cannot be read.
    fn read_table(&self, sheet: &str) -> Result<Vec<TableRow>, TraitError>;

    /// Human-readable description of where the data comes from.
    fn describe(&self) -> String;
}

/// A source with no sheets (for testing).
pub struct EmptyTableSource;

impl TableSource for EmptyTableSource {
    fn read_table(&self, sheet: &str) -> Result<Vec<TableRow>, TraitError> {
        Err(TraitError::NotFound(format!("sheet '{sheet}'")))
    }

    fn describe(&self) -> String {
        "empty".to_string()
    }
}
