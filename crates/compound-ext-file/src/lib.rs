//! # Compound Ext File
//!
//! File-based tabular sources for the Compound total-return service.
//!
//! This crate provides default implementations of [`TableSource`] for EOD
//! loads, static datasets, and tests:
//! - CSV workbook: a directory with one `<sheet>.csv` export per sheet
//! - JSON workbook: one document mapping sheet names to arrays of row objects
//! - In-memory workbook: rows assembled in code
//!
//! Cells are typed on the way in (see [`infer_cell`]) so that spreadsheet
//! exports behave like the original workbook: ISO dates become structured
//! dates, numbers become numbers, and everything else stays text.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod csv_workbook;
mod infer;
mod json_workbook;
mod memory;

pub use csv_workbook::*;
pub use infer::*;
pub use json_workbook::*;
pub use memory::*;

use std::path::Path;
use std::sync::Arc;

use compound_traits::error::TraitError;
use compound_traits::source::TableSource;

/// Supported on-disk workbook layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkbookFormat {
    /// Directory of `<sheet>.csv` files.
    Csv,
    /// Single JSON document keyed by sheet name.
    Json,
}

/// Open a file-based workbook as a shared [`TableSource`].
pub fn open_workbook(
    path: impl AsRef<Path>,
    format: WorkbookFormat,
) -> Result<Arc<dyn TableSource>, TraitError> {
    Ok(match format {
        WorkbookFormat::Csv => Arc::new(CsvWorkbook::open(path)?),
        WorkbookFormat::Json => Arc::new(JsonWorkbook::open(path)?),
    })
}
