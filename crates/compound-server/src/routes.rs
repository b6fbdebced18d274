//! Route definitions.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use compound_engine::SeriesStore;

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `store` - The series store built at startup
pub fn create_router(store: SeriesStore) -> Router {
    let state = Arc::new(AppState { store });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        // Series
        .route("/api/series", get(handlers::get_series))
        .route("/returns", get(handlers::get_returns))
        // State
        .with_state(state)
}
