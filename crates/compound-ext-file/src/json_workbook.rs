//! JSON-based workbook.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use compound_core::CellValue;
use compound_traits::error::TraitError;
use compound_traits::source::{TableRow, TableSource};

use crate::infer::infer_text_cell;

// =============================================================================
// JSON WORKBOOK
// =============================================================================

/// A single JSON document holding every sheet.
///
/// ```json
/// {
///   "rawdata": [
///     { "ReferenceDate": "1990-01-02", "DailyReturn": 1.7791 },
///     { "ReferenceDate": 32876, "DailyReturn": "-0.2564" }
///   ]
/// }
/// ```
///
/// Numbers become `Number`, `null` becomes `Empty`, strings are typed with
/// [`infer_text_cell`] (ISO dates become `Date`, everything else stays text).
#[derive(Debug, Clone)]
pub struct JsonWorkbook {
    file_path: PathBuf,
    sheets: BTreeMap<String, Vec<TableRow>>,
}

impl JsonWorkbook {
    /// Open and parse a workbook document.
    pub fn open(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let file_path = file_path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&file_path)?;
        let sheets = parse_sheets(&content)?;
        Ok(Self { file_path, sheets })
    }

    /// Parse a workbook document held in memory.
    pub fn from_json(content: &str) -> Result<Self, TraitError> {
        Ok(Self {
            file_path: PathBuf::from("<memory>"),
            sheets: parse_sheets(content)?,
        })
    }

    /// Names of the sheets in the document.
    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}

impl TableSource for JsonWorkbook {
    fn read_table(&self, sheet: &str) -> Result<Vec<TableRow>, TraitError> {
        self.sheets
            .get(sheet)
            .cloned()
            .ok_or_else(|| TraitError::NotFound(format!("sheet '{sheet}'")))
    }

    fn describe(&self) -> String {
        format!("json:{}", self.file_path.display())
    }
}

fn parse_sheets(content: &str) -> Result<BTreeMap<String, Vec<TableRow>>, TraitError> {
    let document: BTreeMap<String, Vec<BTreeMap<String, Value>>> =
        serde_json::from_str(content).map_err(|e| TraitError::ParseError(e.to_string()))?;

    Ok(document
        .into_iter()
        .map(|(name, records)| {
            let rows = records
                .into_iter()
                .map(|record| {
                    record
                        .into_iter()
                        .map(|(column, value)| (column, json_cell(value)))
                        .collect::<TableRow>()
                })
                .filter(|row| !row.is_blank())
                .collect();
            (name, rows)
        })
        .collect())
}

fn json_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Value::String(s) => infer_text_cell(&s),
        Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
