//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::{RedirectService, ShortenService, StatsService};
use crate::domain::repositories::MappingRepository;
use crate::utils::key_generator::KeyGenerator;

/// Services wired to one mapping store and one key generator.
///
/// Cloning is cheap; every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService<dyn MappingRepository, dyn KeyGenerator>>,
    pub redirect_service: Arc<RedirectService<dyn MappingRepository>>,
    pub stats_service: Arc<StatsService<dyn MappingRepository>>,
    pub repository: Arc<dyn MappingRepository>,
}

impl AppState {
    /// Builds the service graph.
    ///
    /// The statistics cache is shared by the shorten and redirect services so
    /// every mutating call updates the same counters.
    pub fn new(
        repository: Arc<dyn MappingRepository>,
        key_generator: Arc<dyn KeyGenerator>,
        base_url: impl Into<String>,
        max_attempts: usize,
    ) -> Self {
        let stats_service = Arc::new(StatsService::new(repository.clone()));

        let shorten_service = Arc::new(
            ShortenService::new(
                repository.clone(),
                key_generator,
                stats_service.clone(),
                base_url,
            )
            .with_max_attempts(max_attempts),
        );

        let redirect_service = Arc::new(RedirectService::new(
            repository.clone(),
            stats_service.clone(),
        ));

        Self {
            shorten_service,
            redirect_service,
            stats_service,
            repository,
        }
    }
}
