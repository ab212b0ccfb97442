//! DTOs for the JSON shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortenOutcome;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
}

/// Shortened link as returned by the API.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_key: String,
    pub short_url: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    /// False when the URL had already been shortened.
    pub created: bool,
}

impl From<ShortenOutcome> for ShortenResponse {
    fn from(outcome: ShortenOutcome) -> Self {
        Self {
            short_key: outcome.mapping.short_key,
            short_url: outcome.short_url,
            original_url: outcome.mapping.original_url,
            clicks: outcome.mapping.clicks,
            created_at: outcome.mapping.created_at,
            created: outcome.created,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        let ok = ShortenRequest {
            url: "https://example.com/a".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = ShortenRequest {
            url: "not a url".to_string(),
        };
        assert!(bad.validate().is_err());
    }
}
