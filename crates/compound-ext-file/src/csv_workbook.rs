//! CSV-based workbook.

use std::path::{Path, PathBuf};

use compound_traits::error::TraitError;
use compound_traits::source::{TableRow, TableSource};

use crate::infer::infer_cell;

// =============================================================================
// CSV WORKBOOK
// =============================================================================

/// A directory of CSV exports, one `<sheet>.csv` per sheet.
///
/// The first line of every file is the header row. Blank lines and rows
/// whose cells are all blank are skipped; short rows simply lack the
/// trailing columns.
#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    dir: PathBuf,
}

impl CsvWorkbook {
    /// Open a workbook directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, TraitError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(TraitError::NotFound(format!(
                "workbook directory {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Path of the file backing `sheet`.
    pub fn sheet_path(&self, sheet: &str) -> PathBuf {
        self.dir.join(format!("{sheet}.csv"))
    }
}

impl TableSource for CsvWorkbook {
    fn read_table(&self, sheet: &str) -> Result<Vec<TableRow>, TraitError> {
        let path = self.sheet_path(sheet);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| csv_error(&path, e))?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| csv_error(&path, e))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| csv_error(&path, e))?;
            let row: TableRow = headers
                .iter()
                .zip(record.iter())
                .map(|(header, field)| (header.clone(), infer_cell(field)))
                .collect();

            if !row.is_blank() {
                rows.push(row);
            }
        }

        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.dir.display())
    }
}

fn csv_error(path: &Path, e: csv::Error) -> TraitError {
    let context = path.display().to_string();
    match e.into_kind() {
        csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            TraitError::NotFound(context)
        }
        csv::ErrorKind::Io(io) => TraitError::IoError(format!("{context}: {io}")),
        other => TraitError::ParseError(format!("{context}: {other:?}")),
    }
}
