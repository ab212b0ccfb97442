//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Shorten form with the total of shortened links
//! - `POST /shorten`     - Form submission, renders the shortened link
//! - `GET  /short/{key}` - Short link redirect (301)
//! - `GET  /health`      - Health check of the mapping store
//! - `/api/*`            - JSON API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::{health_handler, missing_key_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .merge(web::routes::routes())
        .route("/short/{key}", get(redirect_handler))
        .route("/short", get(missing_key_handler))
        .route("/short/", get(missing_key_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::routes())
        .with_state(state)
        .layer(tracing::layer())
}
