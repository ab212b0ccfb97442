//! Statistics aggregator.

use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use tracing::{debug, warn};

use crate::domain::entities::Statistics;
use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

/// Best-effort in-memory cache of link totals and per-key click counts.
///
/// The cache is written through from values the store returns and re-synced
/// from store queries; it is never the only place a count is recorded.
/// Readers may observe values that lag behind concurrent writes.
pub struct StatsService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    total_shortened_links: AtomicI64,
    clicks_per_short_link: DashMap<String, i64>,
}

impl<R: MappingRepository + ?Sized> StatsService<R> {
    /// Creates a new statistics service with an empty cache.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            total_shortened_links: AtomicI64::new(0),
            clicks_per_short_link: DashMap::new(),
        }
    }

    /// Recounts the stored mappings and caches the result.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried; the
    /// cached total is left unchanged.
    pub async fn refresh_total(&self) -> Result<i64, AppError> {
        let total = self.repository.count_all().await?;
        self.total_shortened_links.store(total, Ordering::Relaxed);
        Ok(total)
    }

    /// Increments the click count of `key` in the store.
    ///
    /// Returns the new count, or `None` if the key is unknown or the update
    /// failed. Failures are logged and never propagated.
    pub async fn record_click(&self, key: &str) -> Option<i64> {
        match self.repository.increment_clicks(key).await {
            Ok(Some(clicks)) => {
                // Concurrent increments may finish out of order.
                self.clicks_per_short_link
                    .entry(key.to_string())
                    .and_modify(|cached| *cached = (*cached).max(clicks))
                    .or_insert(clicks);
                Some(clicks)
            }
            Ok(None) => {
                debug!(short_key = %key, "click for unknown short key");
                None
            }
            Err(e) => {
                metrics::counter!("shortkey_click_update_failures_total").increment(1);
                warn!(short_key = %key, error = %e, "failed to update click count");
                None
            }
        }
    }

    /// Overwrites the click count of `key` in the store, then in the cache.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store update fails.
    pub async fn set_clicks(&self, key: &str, count: i64) -> Result<(), AppError> {
        self.repository.set_clicks(key, count).await?;
        self.clicks_per_short_link.insert(key.to_string(), count);
        Ok(())
    }

    /// Rebuilds the whole cache from the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if either store query fails.
    pub async fn resync(&self) -> Result<Statistics, AppError> {
        let total = self.repository.count_all().await?;
        let counts = self.repository.click_counts().await?;

        self.total_shortened_links.store(total, Ordering::Relaxed);
        self.clicks_per_short_link.clear();
        for (key, clicks) in counts {
            self.clicks_per_short_link.insert(key, clicks);
        }

        debug!(total, "statistics re-synced from store");
        Ok(self.snapshot())
    }

    /// Cached total of shortened links.
    pub fn total_shortened_links(&self) -> i64 {
        self.total_shortened_links.load(Ordering::Relaxed)
    }

    /// Cached click count of `key`, if known.
    pub fn clicks_for(&self, key: &str) -> Option<i64> {
        self.clicks_per_short_link.get(key).map(|entry| *entry)
    }

    /// Copies the cache into a [`Statistics`] value.
    pub fn snapshot(&self) -> Statistics {
        let clicks_per_short_link: BTreeMap<String, i64> = self
            .clicks_per_short_link
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();

        Statistics {
            total_shortened_links: self.total_shortened_links(),
            clicks_per_short_link,
        }
    }
}
