//! Page route configuration.

use crate::state::AppState;
use crate::web::handlers::{form_handler, shorten_form_handler};
use axum::{
    Router,
    routing::{get, post},
};

/// Browser-facing routes.
///
/// # Endpoints
///
/// - `GET  /`        - Shorten form with the total of shortened links
/// - `POST /shorten` - Form submission
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(form_handler))
        .route("/shorten", post(shorten_form_handler))
}
