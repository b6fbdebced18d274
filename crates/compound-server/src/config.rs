//! Server configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use compound_engine::extract::{DEFAULT_DATE_COLUMN, DEFAULT_RETURN_COLUMN};
use compound_engine::reference::{DEFAULT_COMPARE_FIRST, DEFAULT_EPSILON};
use compound_engine::store::DEFAULT_RAW_SHEET;
use compound_engine::{ColumnMap, DateSystem, IngestSpec, ReferenceSpec};
use compound_ext_file::WorkbookFormat;

use crate::error::ServerResult;

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Workbook holding the daily returns
    #[serde(default)]
    pub source: SourceConfig,

    /// One-time cross-check against a reference sheet
    #[serde(default)]
    pub validation: ValidationConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            source: SourceConfig::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> ServerResult<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// On-disk layout of the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Directory of `<sheet>.csv` exports.
    #[default]
    Csv,
    /// One JSON document keyed by sheet name.
    Json,
}

impl From<SourceFormat> for WorkbookFormat {
    fn from(format: SourceFormat) -> Self {
        match format {
            SourceFormat::Csv => WorkbookFormat::Csv,
            SourceFormat::Json => WorkbookFormat::Json,
        }
    }
}

/// Where the raw daily returns live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Workbook path (a directory for CSV, a file for JSON)
    #[serde(default = "default_source_path")]
    pub path: String,

    /// Workbook layout
    #[serde(default)]
    pub format: SourceFormat,

    /// Sheet with the raw rows
    #[serde(default = "default_raw_sheet")]
    pub raw_sheet: String,

    /// Date column
    #[serde(default = "default_date_column")]
    pub date_column: String,

    /// Daily return column (percent)
    #[serde(default = "default_return_column")]
    pub return_column: String,

    /// Serial date epoch, `"1900"` or `"1904"`
    #[serde(default)]
    pub date_system: DateSystem,
}

fn default_source_path() -> String {
    "./data/workbook".to_string()
}

fn default_raw_sheet() -> String {
    DEFAULT_RAW_SHEET.to_string()
}

fn default_date_column() -> String {
    DEFAULT_DATE_COLUMN.to_string()
}

fn default_return_column() -> String {
    DEFAULT_RETURN_COLUMN.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: default_source_path(),
            format: SourceFormat::default(),
            raw_sheet: default_raw_sheet(),
            date_column: default_date_column(),
            return_column: default_return_column(),
            date_system: DateSystem::default(),
        }
    }
}

impl SourceConfig {
    /// Ingestion parameters for the series store.
    pub fn ingest_spec(&self) -> IngestSpec {
        IngestSpec {
            sheet: self.raw_sheet.clone(),
            columns: ColumnMap::new(&self.date_column, &self.return_column),
            date_system: self.date_system,
        }
    }
}

/// Startup cross-check settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Run the check at startup
    #[serde(default)]
    pub enabled: bool,

    /// Sheet with the reference total returns
    #[serde(default = "default_reference_sheet")]
    pub reference_sheet: String,

    /// Reference total-return column
    #[serde(default = "default_total_return_column")]
    pub total_return_column: String,

    /// Number of leading points to compare
    #[serde(default = "default_compare_first")]
    pub compare_first: usize,

    /// Absolute tolerance
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_reference_sheet() -> String {
    ReferenceSpec::default().sheet
}

fn default_total_return_column() -> String {
    ReferenceSpec::default().total_return_column
}

fn default_compare_first() -> usize {
    DEFAULT_COMPARE_FIRST
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            reference_sheet: default_reference_sheet(),
            total_return_column: default_total_return_column(),
            compare_first: default_compare_first(),
            epsilon: default_epsilon(),
        }
    }
}

impl ValidationConfig {
    /// Reference sheet parameters; dates are read like the raw sheet's.
    pub fn reference_spec(&self, source: &SourceConfig) -> ReferenceSpec {
        ReferenceSpec {
            sheet: self.reference_sheet.clone(),
            date_column: source.date_column.clone(),
            total_return_column: self.total_return_column.clone(),
            date_system: source.date_system,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServerConfig::from_toml("").unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.source.raw_sheet, "rawdata");
        assert!(!config.validation.enabled);
        assert_eq!(config.validation.compare_first, 50);
    }

    #[test]
    fn test_partial_sections() {
        let config = ServerConfig::from_toml(
            r#"
            port = 8081

            [source]
            path = "data/returns.json"
            format = "json"
            date_system = "1904"

            [validation]
            enabled = true
            epsilon = 1e-8
            "#,
        )
        .unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8081);
        assert_eq!(config.source.format, SourceFormat::Json);
        assert_eq!(config.source.date_system, DateSystem::Excel1904);
        assert_eq!(config.source.date_column, "ReferenceDate");
        assert!(config.validation.enabled);
        assert_eq!(config.validation.epsilon, 1e-8);
        assert_eq!(config.validation.reference_sheet, "totalreturn");
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ServerConfig::from_toml("port = \"eighty\"").is_err());
    }

    #[test]
    fn test_specs() {
        let mut source = SourceConfig::default();
        source.date_column = "Day".to_string();

        let ingest = source.ingest_spec();
        assert_eq!(ingest.columns.date, "Day");
        assert_eq!(ingest.columns.daily_return, "DailyReturn");

        let reference = ValidationConfig::default().reference_spec(&source);
        assert_eq!(reference.date_column, "Day");
        assert_eq!(reference.total_return_column, "Total Return");
    }
}
