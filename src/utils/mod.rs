//! Helper functions for key generation, URL validation and database errors.
//!
//! - [`key_generator`] - Short key generation
//! - [`url_validator`] - URL input validation
//! - [`db_error`] - SQLx error classification

pub mod db_error;
pub mod key_generator;
pub mod url_validator;
