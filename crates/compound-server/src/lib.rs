//! # Compound Server
//!
//! REST server for the Compound total-return series.
//!
//! ## Features
//!
//! - `GET /api/series`: filtered, paginated series with range metadata
//! - `GET /returns`: the full series
//! - Health endpoint
//! - Configuration via TOML file
//! - Optional one-time cross-check against a reference sheet at startup
//!
//! ## Usage
//!
//! ```ignore
//! use compound_server::{build_store, Server, ServerConfig};
//!
//! let config = ServerConfig::from_file("config/compound.toml")?;
//! let store = build_store(&config)?;
//! Server::new(config, store).start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use compound_engine::{cross_validate, read_reference_series, SeriesStore, ValidationReport};
use compound_ext_file::open_workbook;
use compound_traits::TableSource;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};

/// The Compound server.
pub struct Server {
    config: ServerConfig,
    store: SeriesStore,
}

impl Server {
    /// Create a new server.
    pub fn new(config: ServerConfig, store: SeriesStore) -> Self {
        Self { config, store }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.store.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let listener = self.bind().await?;
        axum::serve(listener, self.router()).await
    }

    /// Bind the configured host and port.
    ///
    /// The host may be an IP address or a hostname; a host that does not
    /// resolve is an error.
    pub async fn bind(&self) -> Result<TcpListener, std::io::Error> {
        let listener = TcpListener::bind((self.config.host.as_str(), self.config.port)).await?;
        info!("Starting Compound server on {}", listener.local_addr()?);
        Ok(listener)
    }
}

/// Open the configured workbook and build the series store.
///
/// A workbook that cannot be opened or read is fatal. When validation is
/// enabled, the computed series is checked once against the reference sheet;
/// a mismatch is logged and does not stop startup.
pub fn build_store(config: &ServerConfig) -> ServerResult<SeriesStore> {
    info!(
        "Opening {:?} workbook at {}",
        config.source.format, config.source.path
    );
    let source = open_workbook(&config.source.path, config.source.format.into())?;
    let store = SeriesStore::ingest(source.as_ref(), &config.source.ingest_spec())?;

    let summary = store.source_summary();
    info!(
        points = store.len(),
        rows_read = summary.rows_read,
        "Loaded series from {}",
        summary.source
    );
    debug!(rows_rejected = summary.rows_rejected(), "Rows excluded by validation");

    if config.validation.enabled {
        validate_on_startup(&store, source.as_ref(), config);
    }

    Ok(store)
}

/// Cross-check the store against the reference sheet, logging the outcome.
pub fn validate_on_startup(
    store: &SeriesStore,
    source: &dyn TableSource,
    config: &ServerConfig,
) -> Option<ValidationReport> {
    let validation = &config.validation;
    let spec = validation.reference_spec(&config.source);

    let reference = match read_reference_series(source, &spec) {
        Ok(reference) => reference,
        Err(e) => {
            warn!("Reference sheet '{}' unavailable: {}", spec.sheet, e);
            return None;
        }
    };

    match cross_validate(
        store.series(),
        &reference,
        validation.compare_first,
        validation.epsilon,
    ) {
        Ok(report) => {
            info!(
                compared = report.compared,
                max_abs_diff = report.max_abs_diff,
                "Series agrees with reference sheet '{}'",
                spec.sheet
            );
            Some(report)
        }
        Err(e) => {
            warn!("Series disagrees with reference sheet '{}': {}", spec.sheet, e);
            None
        }
    }
}
