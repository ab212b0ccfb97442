#![allow(dead_code)]

use axum_test::TestServer;
use shortkey::domain::repositories::MappingRepository;
use shortkey::infrastructure::persistence::MemoryMappingRepository;
use shortkey::routes::app_router;
use shortkey::state::AppState;
use shortkey::utils::key_generator::RandomKeyGenerator;
use std::sync::Arc;

pub const BASE_URL: &str = "http://localhost:3030";

/// State over a fresh in-memory store.
pub fn create_test_state() -> AppState {
    create_test_state_with(Arc::new(MemoryMappingRepository::new()))
}

pub fn create_test_state_with(repository: Arc<dyn MappingRepository>) -> AppState {
    AppState::new(
        repository,
        Arc::new(RandomKeyGenerator::with_seed(7)),
        BASE_URL,
        5,
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}

/// Stored (key, clicks) for `url`.
pub async fn stored_mapping(state: &AppState, url: &str) -> Option<(String, i64)> {
    state
        .repository
        .find_by_original_url(url)
        .await
        .unwrap()
        .map(|m| (m.short_key, m.clicks))
}
