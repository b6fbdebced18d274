//! In-memory workbook.

use std::collections::HashMap;

use compound_traits::error::TraitError;
use compound_traits::source::{TableRow, TableSource};

/// Sheets assembled in code (for testing and embedding).
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: HashMap<String, Vec<TableRow>>,
}

impl InMemoryWorkbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a sheet (builder style).
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<TableRow>) -> Self {
        self.insert_sheet(name, rows);
        self
    }

    /// Add or replace a sheet.
    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<TableRow>) {
        self.sheets.insert(name.into(), rows);
    }
}

impl TableSource for InMemoryWorkbook {
    fn read_table(&self, sheet: &str) -> Result<Vec<TableRow>, TraitError> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| TraitError::NotFound(format!("sheet '{sheet}'")))
    }

    fn describe(&self) -> String {
        format!("memory:{} sheet(s)", self.sheets.len())
    }
}
