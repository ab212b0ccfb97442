//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten` - Shorten one URL
/// - `GET  /stats`   - Statistics re-synced from the store
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats", get(stats_handler))
}
