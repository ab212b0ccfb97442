//! PostgreSQL implementation of the mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{NewMapping, UrlMapping};
use crate::domain::repositories::MappingRepository;
use crate::error::StoreError;
use crate::utils::db_error::classify_sqlx_error;

/// Default bound on a single store call.
pub const DEFAULT_OPERATION_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(sqlx::FromRow)]
struct MappingRow {
    short_key: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

impl From<MappingRow> for UrlMapping {
    fn from(row: MappingRow) -> Self {
        UrlMapping::new(row.short_key, row.original_url, row.clicks, row.created_at)
    }
}

/// PostgreSQL repository for short key mappings.
///
/// Click increments are single `UPDATE ... SET clicks = clicks + 1` statements,
/// so concurrent redirects to the same key are serialized by the row lock.
/// Every query is bounded by `operation_timeout`.
pub struct PgMappingRepository {
    pool: Arc<PgPool>,
    operation_timeout: Duration,
}

impl PgMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_OPERATION_TIMEOUT)
    }

    /// Creates a repository with a custom per-operation timeout.
    pub fn with_timeout(pool: Arc<PgPool>, operation_timeout: Duration) -> Self {
        Self {
            pool,
            operation_timeout,
        }
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.operation_timeout, op).await {
            Ok(result) => result.map_err(classify_sqlx_error),
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

#[async_trait]
impl MappingRepository for PgMappingRepository {
    async fn find_by_original_url(&self, url: &str) -> Result<Option<UrlMapping>, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    SELECT short_key, original_url, clicks, created_at
                    FROM url_mappings
                    WHERE original_url = $1
                    "#,
                )
                .bind(url)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn find_by_short_key(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, String>(
                "SELECT original_url FROM url_mappings WHERE short_key = $1",
            )
            .bind(key)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<UrlMapping, StoreError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, MappingRow>(
                    r#"
                    INSERT INTO url_mappings (short_key, original_url, clicks)
                    VALUES ($1, $2, 0)
                    RETURNING short_key, original_url, clicks, created_at
                    "#,
                )
                .bind(&new_mapping.short_key)
                .bind(&new_mapping.original_url)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn set_clicks(&self, key: &str, count: i64) -> Result<(), StoreError> {
        self.bounded(
            sqlx::query("UPDATE url_mappings SET clicks = $2 WHERE short_key = $1")
                .bind(key)
                .bind(count)
                .execute(self.pool.as_ref()),
        )
        .await?;

        Ok(())
    }

    async fn increment_clicks(&self, key: &str) -> Result<Option<i64>, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>(
                r#"
                UPDATE url_mappings
                SET clicks = clicks + 1
                WHERE short_key = $1
                RETURNING clicks
                "#,
            )
            .bind(key)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn count_all(&self) -> Result<i64, StoreError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url_mappings")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn click_counts(&self) -> Result<Vec<(String, i64)>, StoreError> {
        self.bounded(
            sqlx::query_as::<_, (String, i64)>(
                "SELECT short_key, clicks FROM url_mappings ORDER BY short_key",
            )
            .fetch_all(self.pool.as_ref()),
        )
        .await
    }

    async fn health_check(&self) -> bool {
        self.bounded(sqlx::query("SELECT 1").execute(self.pool.as_ref()))
            .await
            .is_ok()
    }
}
