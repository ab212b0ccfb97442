//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, database connections, migrations, statistics
//! warm-up and the Axum server lifecycle.

use crate::config::{Config, StoreBackend, mask_connection_string};
use crate::domain::repositories::MappingRepository;
use crate::infrastructure::persistence::{MemoryMappingRepository, PgMappingRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::utils::key_generator::RandomKeyGenerator;

use anyhow::{Context, Result};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Mapping store (PostgreSQL pool with migrations, or in-memory)
/// - Key generator, seeded once
/// - Statistics cache from the store
/// - Axum HTTP server with graceful shutdown on Ctrl+C or SIGTERM
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let repository = init_repository(&config).await?;

    let state = AppState::new(
        repository,
        Arc::new(RandomKeyGenerator::new()),
        config.base_url.clone(),
        config.shorten_max_attempts,
    );

    // The service still starts when the store is briefly unavailable.
    match state.stats_service.resync().await {
        Ok(stats) => tracing::info!(
            total = stats.total_shortened_links,
            "Statistics loaded from store"
        ),
        Err(e) => tracing::warn!("Failed to load statistics at startup: {}", e),
    }

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Builds the mapping store selected by `STORE_BACKEND`.
async fn init_repository(config: &Config) -> Result<Arc<dyn MappingRepository>> {
    match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; mappings are lost on restart");
            Ok(Arc::new(MemoryMappingRepository::new()))
        }
        StoreBackend::Postgres => {
            let pool = connect_pool(config).await?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgMappingRepository::with_timeout(
                Arc::new(pool),
                config.store_timeout(),
            )))
        }
    }
}

/// Opens the PostgreSQL pool and verifies it with a ping.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is required for the postgres store backend")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(database_url)
            )
        })?;

    sqlx::query("SELECT 1")
        .execute(&pool)
        .await
        .context("Database ping failed")?;
    tracing::info!("Connected to database");

    Ok(pool)
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
