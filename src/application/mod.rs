//! Application layer services implementing business logic.
//!
//! Services orchestrate repository calls, validation and statistics updates,
//! and provide the API consumed by HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::shorten_service::ShortenService`] - URL to short key
//! - [`services::redirect_service::RedirectService`] - Short key to URL, with click counting
//! - [`services::stats_service::StatsService`] - Cached totals and click counts

pub mod services;
