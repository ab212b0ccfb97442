//! Input validation for URLs submitted for shortening.
//!
//! URLs are checked, not rewritten: the stored URL must be exactly what the
//! visitor is redirected to.

use url::Url;

/// Upper bound on accepted URL length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Reasons a submitted URL is rejected.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Validates a URL and returns it with surrounding whitespace removed.
///
/// # Rules
///
/// 1. Must be non-empty after trimming
/// 2. At most [`MAX_URL_LENGTH`] characters
/// 3. Must parse as an absolute URL
/// 4. Scheme must be `http` or `https` (rejects `javascript:`, `data:`, `file:`)
/// 5. Must have a host
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] encountered.
pub fn validate_url(input: &str) -> Result<&str, UrlValidationError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let url = Url::parse(trimmed).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(trimmed)
}
