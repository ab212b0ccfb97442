//! Link shortening service.

use serde_json::json;
use std::sync::Arc;
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::{AppError, StoreError};
use crate::utils::key_generator::KeyGenerator;
use crate::utils::url_validator::validate_url;

use super::StatsService;

/// Default number of keys tried before giving up on a collision streak.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Result of a shorten request.
#[derive(Debug, Clone)]
pub struct ShortenOutcome {
    /// The mapping, with the click count after this request.
    pub mapping: UrlMapping,
    /// Public URL that redirects to the original.
    pub short_url: String,
    /// True if this request created the mapping.
    pub created: bool,
}

/// Service that turns original URLs into short keys.
///
/// Each URL maps to at most one key. Shortening a known URL again reuses its
/// key and counts as a click; new URLs get a freshly generated key, retried
/// on collision.
pub struct ShortenService<R: MappingRepository + ?Sized, G: KeyGenerator + ?Sized> {
    repository: Arc<R>,
    key_generator: Arc<G>,
    stats: Arc<StatsService<R>>,
    base_url: String,
    max_attempts: usize,
}

impl<R: MappingRepository + ?Sized, G: KeyGenerator + ?Sized> ShortenService<R, G> {
    /// Creates a new shorten service.
    ///
    /// `base_url` is the public origin short links are built on, e.g.
    /// `http://localhost:3030`.
    pub fn new(
        repository: Arc<R>,
        key_generator: Arc<G>,
        stats: Arc<StatsService<R>>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            key_generator,
            stats,
            base_url: base_url.into(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Sets how many keys are tried per new URL. Values below 1 are raised to 1.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Shortens `url`, reusing the existing key if it was shortened before.
    ///
    /// # Flow
    ///
    /// 1. Validate the URL (no store access for invalid input)
    /// 2. Look up an existing mapping; if found, count a click and reuse it
    /// 3. Otherwise insert under a generated key, regenerating on collision
    /// 4. Refresh the cached total of shortened links (best-effort)
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for empty or malformed URLs.
    /// Returns [`AppError::Internal`] on store failures or when every
    /// generated key collided.
    pub async fn shorten(&self, url: &str) -> Result<ShortenOutcome, AppError> {
        let url = validate_url(url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        let (mapping, created) = match self.repository.find_by_original_url(url).await? {
            Some(existing) => (self.count_repeat(existing).await, false),
            None => match self.insert_with_fresh_key(url).await {
                Ok(mapping) => (mapping, true),
                Err(StoreError::DuplicateUrl) => {
                    // Lost a race with a concurrent request for the same URL.
                    let existing = self
                        .repository
                        .find_by_original_url(url)
                        .await?
                        .ok_or_else(|| {
                            AppError::internal("Mapping vanished after conflict", json!({}))
                        })?;
                    (self.count_repeat(existing).await, false)
                }
                Err(StoreError::DuplicateKey) => {
                    return Err(AppError::internal(
                        "Failed to generate unique short key",
                        json!({ "attempts": self.max_attempts }),
                    ));
                }
                Err(e) => return Err(e.into()),
            },
        };

        if created {
            metrics::counter!("shortkey_links_created_total").increment(1);
            info!(short_key = %mapping.short_key, "created short link");
        }

        if let Err(e) = self.stats.refresh_total().await {
            warn!(error = %e, "failed to refresh shortened link total");
        }

        let short_url = self.short_url(&mapping.short_key);

        Ok(ShortenOutcome {
            mapping,
            short_url,
            created,
        })
    }

    /// Builds the public short URL for `key`.
    pub fn short_url(&self, key: &str) -> String {
        format!("{}/short/{}", self.base_url.trim_end_matches('/'), key)
    }

    /// Counts a repeated shorten request as a click.
    ///
    /// Keeps the stored count if the increment fails.
    async fn count_repeat(&self, existing: UrlMapping) -> UrlMapping {
        match self.stats.record_click(&existing.short_key).await {
            Some(clicks) => existing.with_clicks(clicks),
            None => existing,
        }
    }

    /// Inserts `url` under a generated key, regenerating on key collisions.
    async fn insert_with_fresh_key(&self, url: &str) -> Result<UrlMapping, StoreError> {
        let retries = FixedInterval::from_millis(0).take(self.max_attempts - 1);

        RetryIf::spawn(
            retries,
            || {
                let new_mapping = NewMapping::new(self.key_generator.generate(), url);
                let repository = self.repository.clone();
                async move { repository.insert(new_mapping).await }
            },
            |e: &StoreError| {
                if e.is_duplicate_key() {
                    metrics::counter!("shortkey_key_collisions_total").increment(1);
                    debug!("short key collision, regenerating");
                }
                e.is_duplicate_key()
            },
        )
        .await
    }
}
