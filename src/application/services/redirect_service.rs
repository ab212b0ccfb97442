//! Short key resolution service.

use serde_json::json;
use std::sync::Arc;

use crate::domain::repositories::MappingRepository;
use crate::error::AppError;

use super::StatsService;

/// Service that resolves short keys to their original URLs.
pub struct RedirectService<R: MappingRepository + ?Sized> {
    repository: Arc<R>,
    stats: Arc<StatsService<R>>,
}

impl<R: MappingRepository + ?Sized> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>, stats: Arc<StatsService<R>>) -> Self {
        Self { repository, stats }
    }

    /// Resolves `key` to the original URL, counting the visit.
    ///
    /// The click is recorded before the lookup, and its failure never blocks
    /// the redirect. Unknown keys are not created.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the key is empty.
    /// Returns [`AppError::NotFound`] if no mapping exists for the key.
    /// Returns [`AppError::Internal`] if the lookup fails.
    pub async fn resolve(&self, key: &str) -> Result<String, AppError> {
        if key.trim().is_empty() {
            return Err(AppError::bad_request("Shortened key is missing", json!({})));
        }

        metrics::counter!("shortkey_redirects_total").increment(1);
        self.stats.record_click(key).await;

        self.repository
            .find_by_short_key(key)
            .await?
            .ok_or_else(|| AppError::not_found("Shortened key not found", json!({ "key": key })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockMappingRepository;
    use crate::error::StoreError;
    use mockall::Sequence;

    fn service(repo: MockMappingRepository) -> RedirectService<MockMappingRepository> {
        let repo = Arc::new(repo);
        let stats = Arc::new(StatsService::new(repo.clone()));
        RedirectService::new(repo, stats)
    }

    #[tokio::test]
    async fn test_resolve_increments_before_lookup() {
        let mut mock_repo = MockMappingRepository::new();
        let mut seq = Sequence::new();

        mock_repo
            .expect_increment_clicks()
            .withf(|key| key == "aB3xYz")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(1)));
        mock_repo
            .expect_find_by_short_key()
            .withf(|key| key == "aB3xYz")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some("https://example.com/a".to_string())));

        let service = service(mock_repo);

        let url = service.resolve("aB3xYz").await.unwrap();

        assert_eq!(url, "https://example.com/a");
        assert_eq!(service.stats.clicks_for("aB3xYz"), Some(1));
    }

    #[tokio::test]
    async fn test_resolve_unknown_key() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_find_by_short_key()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_insert().times(0);

        let service = service(mock_repo);

        let result = service.resolve("nope00").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_resolve_empty_key() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo.expect_increment_clicks().times(0);
        mock_repo.expect_find_by_short_key().times(0);

        let service = service(mock_repo);

        let result = service.resolve("").await;

        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_click_update_fails() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_increment_clicks()
            .times(1)
            .returning(|_| Err(StoreError::Timeout));
        mock_repo
            .expect_find_by_short_key()
            .times(1)
            .returning(|_| Ok(Some("https://example.com/a".to_string())));

        let service = service(mock_repo);

        assert_eq!(
            service.resolve("aB3xYz").await.unwrap(),
            "https://example.com/a"
        );
    }

    #[tokio::test]
    async fn test_resolve_lookup_failure() {
        let mut mock_repo = MockMappingRepository::new();
        mock_repo
            .expect_increment_clicks()
            .returning(|_| Ok(Some(3)));
        mock_repo
            .expect_find_by_short_key()
            .returning(|_| Err(StoreError::Io("connection refused".to_string())));

        let service = service(mock_repo);

        let result = service.resolve("aB3xYz").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
