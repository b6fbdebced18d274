//! Series Store.
//!
//! The store is built once, eagerly, by an explicit ingestion step and is
//! immutable afterwards. It is cheap to clone: clones share one
//! `Arc<Series>`, so request handlers can each hold a handle and read
//! concurrently without locking.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use compound_core::{DateSystem, NormalizedPoint};
use compound_traits::{TableRow, TableSource};

use crate::compound::compound;
use crate::error::EngineError;
use crate::extract::{extract_with_rejections, ColumnMap};
use crate::query::{query, PageRequest, QueryParams, QueryResult};
use crate::series::Series;

/// Default name of the raw-data sheet.
pub const DEFAULT_RAW_SHEET: &str = "rawdata";

/// Where and how to read the raw daily returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSpec {
    /// Sheet holding the raw rows.
    pub sheet: String,
    /// Field names within the sheet.
    pub columns: ColumnMap,
    /// Epoch convention for serial dates.
    pub date_system: DateSystem,
}

impl Default for IngestSpec {
    fn default() -> Self {
        Self {
            sheet: DEFAULT_RAW_SHEET.to_string(),
            columns: ColumnMap::default(),
            date_system: DateSystem::default(),
        }
    }
}

/// What an ingestion read and kept.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceSummary {
    /// Description of the tabular source.
    pub source: String,
    /// Sheet that was read.
    pub sheet: String,
    /// Data rows examined.
    pub rows_read: usize,
    /// Rows that made it into the series.
    pub rows_retained: usize,
}

impl SourceSummary {
    /// Rows dropped by validation.
    pub fn rows_rejected(&self) -> usize {
        self.rows_read.saturating_sub(self.rows_retained)
    }
}

/// Holds the derived series for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct SeriesStore {
    series: Arc<Series>,
    summary: SourceSummary,
}

impl SeriesStore {
    /// Reads the raw sheet from `source` and builds the store.
    ///
    /// Rows that fail validation are dropped. An empty result is a valid,
    /// empty store.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::SourceUnreadable` if the sheet cannot be read.
    pub fn ingest(source: &dyn TableSource, spec: &IngestSpec) -> Result<Self, EngineError> {
        let description = source.describe();
        info!(source = %description, sheet = %spec.sheet, "Ingesting daily returns");

        let rows = source.read_table(&spec.sheet)?;
        let mut store = Self::from_rows(&rows, spec);
        store.summary.source = description;

        info!(
            rows_read = store.summary.rows_read,
            rows_retained = store.summary.rows_retained,
            start = ?store.series.start_date().map(|d| d.as_str()),
            end = ?store.series.end_date().map(|d| d.as_str()),
            "Series store built"
        );
        Ok(store)
    }

    /// Builds the store from rows already in memory.
    pub fn from_rows(rows: &[TableRow], spec: &IngestSpec) -> Self {
        let extraction = extract_with_rejections(rows, &spec.columns, spec.date_system);
        debug!(
            rejected = extraction.rejections.len(),
            "Extraction finished"
        );

        let summary = SourceSummary {
            source: "memory".to_string(),
            sheet: spec.sheet.clone(),
            rows_read: extraction.rows_read(),
            rows_retained: extraction.points.len(),
        };

        Self {
            series: Arc::new(compound(&extraction.points)),
            summary,
        }
    }

    /// Builds the store from normalized points in any order.
    pub fn from_points(points: Vec<NormalizedPoint>) -> Self {
        let summary = SourceSummary {
            source: "memory".to_string(),
            sheet: String::new(),
            rows_read: points.len(),
            rows_retained: points.len(),
        };
        Self {
            series: Arc::new(compound(&points)),
            summary,
        }
    }

    /// The full series.
    pub fn series(&self) -> &Series {
        &self.series
    }

    /// A shared handle to the full series.
    pub fn shared_series(&self) -> Arc<Series> {
        Arc::clone(&self.series)
    }

    /// Number of points in the series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The unfiltered, unpaginated series.
    pub fn get_full_series(&self) -> &Series {
        self.series()
    }

    /// Runs a query with raw, uncoerced parameters.
    pub fn get_series(&self, params: &QueryParams) -> QueryResult<'_> {
        self.query(&PageRequest::from(params))
    }

    /// Runs an already coerced query.
    pub fn query(&self, request: &PageRequest) -> QueryResult<'_> {
        query(&self.series, request)
    }

    /// Counts and provenance of the ingestion that built this store.
    pub fn source_summary(&self) -> &SourceSummary {
        &self.summary
    }
}
