//! Core domain entities.
//!
//! - [`UrlMapping`] - A persisted short key to original URL mapping
//! - [`NewMapping`] - Insert payload for a mapping
//! - [`Statistics`] - Derived aggregate snapshot, never authoritative

pub mod statistics;
pub mod url_mapping;

pub use statistics::Statistics;
pub use url_mapping::{NewMapping, UrlMapping};
