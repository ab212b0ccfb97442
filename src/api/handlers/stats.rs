//! Handler for the statistics endpoint.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns link and click counters, re-synced from the store.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "total_shortened_links": 2,
///   "total_clicks": 5,
///   "clicks_per_short_link": { "aB3dE9": 4, "Zx81Qp": 1 }
/// }
/// ```
///
/// # Errors
///
/// Returns 500 Internal Server Error if the store cannot be queried.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.resync().await?;

    Ok(Json(stats.into()))
}
