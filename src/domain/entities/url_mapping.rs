//! Mapping entity linking a short key to its original URL.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A persisted short link.
///
/// `short_key` and `original_url` are both unique in the store; `clicks`
/// counts redirects and repeated shorten requests for the same URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlMapping {
    pub short_key: String,
    pub original_url: String,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        short_key: String,
        original_url: String,
        clicks: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            short_key,
            original_url,
            clicks,
            created_at,
        }
    }

    /// Returns a copy with the click count replaced.
    pub fn with_clicks(mut self, clicks: i64) -> Self {
        self.clicks = clicks;
        self
    }
}

/// Input data for inserting a new mapping. Clicks always start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMapping {
    pub short_key: String,
    pub original_url: String,
}

impl NewMapping {
    pub fn new(short_key: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            original_url: original_url.into(),
        }
    }
}
