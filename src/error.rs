//! Error types shared by the store, service and HTTP layers.
//!
//! - [`StoreError`] is returned by [`crate::domain::repositories::MappingRepository`]
//!   implementations.
//! - [`AppError`] is returned by services and handlers and renders itself as a
//!   JSON error body with the matching HTTP status.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

/// Failure of a mapping store operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The short key is already taken by another mapping.
    #[error("short key already exists")]
    DuplicateKey,

    /// The original URL was shortened concurrently under another key.
    #[error("original URL already exists")]
    DuplicateUrl,

    /// The store did not answer within the configured bound.
    #[error("store operation timed out")]
    Timeout,

    /// The store is unavailable or returned an unexpected error.
    #[error("store error: {0}")]
    Io(String),
}

impl StoreError {
    /// Returns true if the error is a short key collision.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Self::DuplicateKey)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error description embedded in JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error mapped onto HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converts the error into the serializable body part.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            Self::Validation { message, details } => ("validation_error", message, details),
            Self::NotFound { message, details } => ("not_found", message, details),
            Self::Conflict { message, details } => ("conflict", message, details),
            Self::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match &e {
            StoreError::DuplicateKey | StoreError::DuplicateUrl => {
                AppError::conflict("Mapping already exists", json!({ "reason": e.to_string() }))
            }
            StoreError::Timeout => {
                AppError::internal("Store operation timed out", json!({}))
            }
            StoreError::Io(_) => AppError::internal("Store error", json!({})),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request("Invalid request", json!({ "fields": fields }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::internal("x", json!({})).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_store_errors_map_to_internal() {
        let err: AppError = StoreError::Timeout.into();
        assert!(matches!(err, AppError::Internal { .. }));

        let err: AppError = StoreError::Io("connection refused".to_string()).into();
        assert!(matches!(err, AppError::Internal { .. }));
    }

    #[test]
    fn test_error_info_code() {
        let info = AppError::not_found("Short key not found", json!({ "key": "abc" }))
            .to_error_info();
        assert_eq!(info.code, "not_found");
        assert_eq!(info.message, "Short key not found");
        assert_eq!(info.details["key"], "abc");
    }

    #[test]
    fn test_display_uses_message() {
        let err = AppError::bad_request("URL is missing", json!({}));
        assert_eq!(err.to_string(), "URL is missing");
    }
}
