//! # Compound Engine
//!
//! The ingestion-normalization-compounding pipeline and its query layer.
//!
//! This crate provides:
//! - [`extract`]: Row Extractor, raw rows to date-sorted [`NormalizedPoint`]s
//! - [`compound()`]: Compounding Engine, a left-to-right growth fold
//! - [`SeriesStore`]: the immutable series built once at startup
//! - [`query()`]: Query Processor, date-range filtering and offset/limit pagination
//! - [`reference`]: cross-checks a computed series against an independent tabulation
//!
//! ## Architecture
//!
//! ```text
//! TableSource ─> extract ─> compound ─> SeriesStore ─> query ─> SeriesResponse
//!      │                                    │
//!      └──────> reference ──────────────────┴─> cross_validate (tests / startup)
//! ```
//!
//! ## Usage
//!
//! ```
//! use compound_engine::{IngestSpec, QueryParams, SeriesStore};
//! use compound_ext_file::InMemoryWorkbook;
//! use compound_traits::TableRow;
//!
//! let workbook = InMemoryWorkbook::new().with_sheet(
//!     "rawdata",
//!     vec![
//!         TableRow::new().with_cell("ReferenceDate", "1/3/2020").with_cell("DailyReturn", -5.0),
//!         TableRow::new().with_cell("ReferenceDate", "1/2/2020").with_cell("DailyReturn", 10.0),
//!     ],
//! );
//!
//! let store = SeriesStore::ingest(&workbook, &IngestSpec::default()).unwrap();
//! let page = store.get_series(&QueryParams::new().with_limit(1));
//!
//! assert_eq!(page.total_count, 2);
//! assert_eq!(page.points[0].date.as_str(), "2020-01-02");
//! assert_eq!(page.end_date.unwrap().as_str(), "2020-01-03");
//! ```
//!
//! ## Numeric contract
//!
//! All returns are `f64`. The compounding fold accumulates rounding error
//! and applies no correction; independent computations agree to roughly
//! `1e-12` over thousands of points, which is what [`reference`] checks.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compound;
pub mod error;
pub mod extract;
pub mod query;
pub mod reference;
pub mod series;
pub mod store;

// Re-exports
pub use compound::compound;
pub use error::{EngineError, ValidationError};
pub use extract::{
    extract, extract_with_rejections, normalize_row, ColumnMap, Extraction, Rejection,
    RejectionReason,
};
pub use query::{
    query, PageRequest, QueryParams, QueryResult, SeriesMeta, SeriesResponse, DEFAULT_LIMIT,
    DEFAULT_OFFSET,
};
pub use reference::{
    cross_validate, read_reference_series, ReferencePoint, ReferenceSpec, ValidationReport,
};
pub use series::Series;
pub use store::{IngestSpec, SeriesStore, SourceSummary};

pub use compound_core::{CanonicalDate, DateSystem, NormalizedPoint, SeriesPoint};
