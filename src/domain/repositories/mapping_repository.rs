//! Repository trait for short key mappings.

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::error::StoreError;
use async_trait::async_trait;

/// Durable store of short key mappings and their click counts.
///
/// The store is the only authoritative place for mappings, totals and click
/// counts. Every call completes (or fails) before returning; implementations
/// must not defer writes to background tasks.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgMappingRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryMappingRepository`] - In-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MappingRepository: Send + Sync {
    /// Finds the mapping for an original URL.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(UrlMapping))` if the URL has been shortened
    /// - `Ok(None)` if not found
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError>;

    /// Finds the original URL for a short key.
    async fn find_by_short_key(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Inserts a new mapping with zero clicks.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateKey`] if the short key already exists
    /// - [`StoreError::DuplicateUrl`] if the original URL already has a mapping
    /// - [`StoreError::Timeout`] / [`StoreError::Io`] on store failures
    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError>;

    /// Overwrites the click count of a short key.
    ///
    /// Unknown keys are ignored.
    async fn set_clicks(&self, key: &str, count: i64) -> Result<(), StoreError>;

    /// Atomically increments the click count of a short key.
    ///
    /// Returns the new count, or `Ok(None)` if the key does not exist. Never
    /// creates a mapping.
    async fn increment_clicks(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Counts all stored mappings.
    async fn count_all(&self) -> Result<i64, StoreError>;

    /// Returns the click count of every mapping.
    async fn click_counts(&self) -> Result<Vec<(String, i64)>, StoreError>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
