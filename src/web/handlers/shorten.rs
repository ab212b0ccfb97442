//! Form submission handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Form, State};
use serde::Deserialize;
use serde_json::json;
use serde_with::{NoneAsEmptyString, serde_as};

use crate::error::AppError;
use crate::state::AppState;

/// Body of the shorten form. An empty field counts as missing.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ShortenForm {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub url: Option<String>,
}

/// Template for the result page, `templates/shortened.html`.
#[derive(Template, WebTemplate)]
#[template(path = "shortened.html")]
pub struct ShortenedTemplate {
    pub original_url: String,
    pub short_url: String,
    pub clicks: i64,
}

/// Shortens the submitted URL and renders the result page.
///
/// # Endpoint
///
/// `POST /shorten` (`application/x-www-form-urlencoded`, field `url`)
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing, empty or invalid.
/// Returns 500 Internal Server Error on store failures.
pub async fn shorten_form_handler(
    State(state): State<AppState>,
    Form(form): Form<ShortenForm>,
) -> Result<ShortenedTemplate, AppError> {
    let url = form
        .url
        .ok_or_else(|| AppError::bad_request("URL is required", json!({ "field": "url" })))?;

    let outcome = state.shorten_service.shorten(&url).await?;

    Ok(ShortenedTemplate {
        original_url: outcome.mapping.original_url,
        short_url: outcome.short_url,
        clicks: outcome.mapping.clicks,
    })
}
