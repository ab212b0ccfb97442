//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /short/{key}`
///
/// # Request Flow
///
/// 1. Increment the click count of the key (best-effort)
/// 2. Look up the original URL
/// 3. Return 301 Moved Permanently with the `Location` header
///
/// # Errors
///
/// Returns 400 Bad Request if the key is blank.
/// Returns 404 Not Found if the key doesn't exist.
/// Returns 500 Internal Server Error if the lookup fails.
pub async fn redirect_handler(
    Path(key): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.redirect_service.resolve(&key).await?;

    // Always 301, `Redirect::permanent` would answer 308.
    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response())
}

/// Rejects `GET /short` and `GET /short/` which carry no key.
pub async fn missing_key_handler() -> AppError {
    AppError::bad_request("Shortened key is missing", json!({}))
}
