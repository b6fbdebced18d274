//! # Compound Traits
//!
//! Trait definitions for the Compound total-return service.
//!
//! This crate contains ONLY the seams between the pipeline and the outside
//! world. All implementations are in separate extension crates.
//!
//! ## Module Structure
//!
//! - [`source`]: the tabular source (`TableSource`) and its rows (`RawRow`)
//! - [`error`]: the error type shared by all source implementations
//!
//! ## Dependency Injection
//!
//! The series store reads through these traits:
//!
//! ```ignore
//! let source: Arc<dyn TableSource> = Arc::new(CsvWorkbook::open("data/workbook")?);
//! let store = SeriesStore::ingest(source.as_ref(), &IngestSpec::default())?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod source;

// Re-export commonly used types
pub use error::TraitError;
pub use source::{RawRow, TableRow, TableSource};
