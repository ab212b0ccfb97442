//! Classification of database errors into [`StoreError`] variants.

use crate::error::StoreError;

/// Primary key constraint of `url_mappings`.
pub const SHORT_KEY_CONSTRAINT: &str = "url_mappings_pkey";

/// Unique constraint on `url_mappings.original_url`.
pub const ORIGINAL_URL_CONSTRAINT: &str = "url_mappings_original_url_key";

/// Maps a SQLx error onto the store error taxonomy.
///
/// Unique violations are told apart by constraint name; pool timeouts become
/// [`StoreError::Timeout`]; everything else is [`StoreError::Io`].
pub fn classify_sqlx_error(e: sqlx::Error) -> StoreError {
    if let Some(db_err) = e.as_database_error()
        && db_err.is_unique_violation()
    {
        return match db_err.constraint() {
            Some(ORIGINAL_URL_CONSTRAINT) => StoreError::DuplicateUrl,
            _ => StoreError::DuplicateKey,
        };
    }

    match e {
        sqlx::Error::PoolTimedOut => StoreError::Timeout,
        other => StoreError::Io(other.to_string()),
    }
}
