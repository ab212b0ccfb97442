//! In-process implementation of the mapping repository.
//!
//! Holds all mappings in RAM with no persistence. Intended for local
//! development (`STORE_BACKEND=memory`) and tests.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;

#[derive(Debug, Default)]
struct Inner {
    by_key: HashMap<String, UrlMapping>,
    by_url: HashMap<String, String>,
}

/// Memory-backed mapping store.
///
/// Both indexes live behind one lock so the key and URL uniqueness checks
/// and the insert happen atomically; increments take the write lock.
#[derive(Debug, Default)]
pub struct MemoryMappingRepository {
    inner: RwLock<Inner>,
}

impl MemoryMappingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.inner.read().by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MappingRepository for MemoryMappingRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let inner = self.inner.read();
        Ok(inner
            .by_url
            .get(url)
            .and_then(|key| inner.by_key.get(key))
            .cloned())
    }

    async fn find_by_short_key(&self, key: &str) -> Result<Option<String>, StoreError> {
        let inner = self.inner.read();
        Ok(inner.by_key.get(key).map(|m| m.original_url.clone()))
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let mut inner = self.inner.write();

        if inner.by_key.contains_key(&new_mapping.short_key) {
            return Err(StoreError::DuplicateKey);
        }
        if inner.by_url.contains_key(&new_mapping.original_url) {
            return Err(StoreError::DuplicateUrl);
        }

        let mapping = UrlMapping::new(
            new_mapping.short_key.clone(),
            new_mapping.original_url.clone(),
            0,
            Utc::now(),
        );
        inner
            .by_url
            .insert(new_mapping.original_url, new_mapping.short_key.clone());
        inner.by_key.insert(new_mapping.short_key, mapping.clone());

        Ok(mapping)
    }

    async fn set_clicks(&self, key: &str, count: i64) -> Result<(), StoreError> {
        if let Some(mapping) = self.inner.write().by_key.get_mut(key) {
            mapping.clicks = count;
        }
        Ok(())
    }

    async fn increment_clicks(&self, key: &str) -> Result<Option<i64>, StoreError> {
        let mut inner = self.inner.write();
        Ok(inner.by_key.get_mut(key).map(|mapping| {
            mapping.clicks += 1;
            mapping.clicks
        }))
    }

    async fn count_all(&self) -> Result<i64, StoreError> {
        Ok(self.inner.read().by_key.len() as i64)
    }

    async fn click_counts(&self) -> Result<Vec<(String, i64)>, StoreError> {
        let inner = self.inner.read();
        let mut counts: Vec<(String, i64)> = inner
            .by_key
            .values()
            .map(|m| (m.short_key.clone(), m.clicks))
            .collect();
        counts.sort();
        Ok(counts)
    }

    async fn health_check(&self) -> bool {
        true
    }
}
