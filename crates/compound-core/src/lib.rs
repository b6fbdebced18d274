//! # Compound Core
//!
//! Core types and date normalization for the Compound total-return series service.
//!
//! This crate provides the foundational building blocks used throughout Compound:
//!
//! - **Types**: `CanonicalDate`, `CellValue`, `NormalizedPoint`, `SeriesPoint`
//! - **Date Normalization**: turning heterogeneous spreadsheet date cells
//!   (structured dates, serial day counts, `M/D/Y` strings) into one canonical form
//!
//! ## Design Philosophy
//!
//! - **One canonical form**: every date that enters the pipeline is a fixed-width
//!   `YYYY-MM-DD` string, so lexicographic order is chronological order
//! - **Absence over failure**: normalization signals an unusable cell with `None`,
//!   never with a panic
//! - **64-bit floats are the numeric contract**: returns and compounded values are `f64`
//!
//! ## Example
//!
//! ```rust
//! use compound_core::prelude::*;
//!
//! let cell = CellValue::Text("1/2/1990".to_string());
//! let date = normalize_date(&cell, DateSystem::Excel1900).unwrap();
//! assert_eq!(date.as_str(), "1990-01-02");
//!
//! let serial = CellValue::Number(32875.0);
//! assert_eq!(normalize_date(&serial, DateSystem::Excel1900), Some(date));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

pub mod error;
pub mod normalize;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::normalize::{normalize_date, DateSystem};
    pub use crate::types::{CanonicalDate, CellValue, NormalizedPoint, SeriesPoint};
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use normalize::{normalize_date, DateSystem};
pub use types::{CanonicalDate, CellValue, NormalizedPoint, SeriesPoint};
