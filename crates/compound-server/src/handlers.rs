//! Request handlers.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use compound_engine::{QueryParams, SeriesResponse, SeriesStore};

/// Application state.
pub struct AppState {
    /// The series built at startup
    pub store: SeriesStore,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Filtered, paginated slice of the series.
///
/// Query string: `limit`, `offset`, `start`, `end`. Values are taken
/// verbatim and coerced by the engine, so a malformed query still gets a
/// `200` with default paging. Repeated keys keep their first value.
pub async fn get_series(
    State(state): State<Arc<AppState>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<SeriesResponse> {
    let params = QueryParams::from_pairs(pairs);
    Json(state.store.get_series(&params).to_response())
}

/// The full series, unfiltered.
pub async fn get_returns(State(state): State<Arc<AppState>>) -> Response {
    Json(state.store.get_full_series()).into_response()
}
