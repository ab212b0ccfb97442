//! Handler for the JSON shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Shortens one URL.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created` for a new mapping, `200 OK` when the URL was already
/// shortened (its click count is incremented).
///
/// ```json
/// {
///   "short_key": "aB3dE9",
///   "short_url": "http://localhost:3030/short/aB3dE9",
///   "original_url": "https://example.com/some/long/path",
///   "clicks": 0,
///   "created_at": "2024-01-01T00:00:00Z",
///   "created": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 500 Internal Server Error on store failures.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    payload.validate()?;

    let outcome = state.shorten_service.shorten(&payload.url).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.into())))
}
