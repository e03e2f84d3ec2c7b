//! Listings Error Types
//!
//! This module provides listing-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Listing-specific result type alias
pub type ListingResult<T> = Result<T, ListingError>;

/// Listing-specific error variants
///
/// These are domain-specific errors that map to appropriate HTTP status codes
/// and can be converted to `AppError` for unified error handling.
#[derive(Debug, Error)]
pub enum ListingError {
    /// Required field is blank or absent
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Field is present but fails validation
    #[error("Invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Daily submission quota exhausted for this source address
    #[error("Daily submission limit reached, try again tomorrow")]
    QuotaExceeded,

    /// No listing with the requested id
    #[error("Listing not found")]
    ListingNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ListingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ListingError::MissingField(_) | ListingError::InvalidField { .. } => {
                StatusCode::BAD_REQUEST
            }
            ListingError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            ListingError::ListingNotFound => StatusCode::NOT_FOUND,
            ListingError::Database(_) | ListingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListingError::MissingField(_) | ListingError::InvalidField { .. } => {
                ErrorKind::BadRequest
            }
            ListingError::QuotaExceeded => ErrorKind::TooManyRequests,
            ListingError::ListingNotFound => ErrorKind::NotFound,
            ListingError::Database(_) | ListingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ListingError::Database(e) => {
                tracing::error!(error = %e, "Listing database error");
            }
            ListingError::Internal(msg) => {
                tracing::error!(message = %msg, "Listing internal error");
            }
            ListingError::QuotaExceeded => {
                tracing::warn!("Submission quota exceeded");
            }
            _ => {
                tracing::debug!(error = %self, "Listing error");
            }
        }
    }

    /// Client-facing message for the response body
    ///
    /// Server-side failures get a generic message so internals never leak.
    fn client_message(&self) -> String {
        match self {
            ListingError::Database(_) | ListingError::Internal(_) => {
                "Internal server error".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        let kind = err.kind();
        let message = err.to_string();
        AppError::new(kind, message)
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = serde_json::json!({
            "success": false,
            "message": self.client_message(),
        });
        (status, Json(body)).into_response()
    }
}
