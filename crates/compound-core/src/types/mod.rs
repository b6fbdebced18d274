//! Domain types for the total-return pipeline.

mod cell;
mod date;
mod point;

pub use cell::CellValue;
pub use date::CanonicalDate;
pub use point::{NormalizedPoint, SeriesPoint};
