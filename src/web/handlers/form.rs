//! Home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::warn;

use crate::state::AppState;

/// Template for the home page.
///
/// Renders `templates/form.html`: the URL input form and the total of
/// shortened links.
#[derive(Template, WebTemplate)]
#[template(path = "form.html")]
pub struct FormTemplate {
    pub total: i64,
}

/// Renders the shorten form.
///
/// # Endpoint
///
/// `GET /`
///
/// The total is recounted from the store; if that fails the last cached
/// value is shown.
pub async fn form_handler(State(state): State<AppState>) -> FormTemplate {
    let total = match state.stats_service.refresh_total().await {
        Ok(total) => total,
        Err(e) => {
            warn!(error = %e, "failed to count shortened links");
            state.stats_service.total_shortened_links()
        }
    };

    FormTemplate { total }
}
