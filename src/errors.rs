//! Centralized error handling.
//!
//! Provides a unified error type for the entire application, with automatic
//! HTTP response conversion. Wire vocabulary: `invalid_request`,
//! `invalid_grant` and `invalid_header` all map to 400, organizer-only
//! violations to 403, missing rows to 404.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("The request is missing the Authorization header or the Authorization header is invalid.")]
    InvalidHeader,

    #[error("The authorization code is invalid or expired.")]
    InvalidGrant,

    #[error("Access denied")]
    Forbidden,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    InvalidRequest(String),

    // External service errors
    #[error("Database error")]
    Database(#[from] sea_orm::DbErr),

    #[error("Cache error: {0}")]
    Cache(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body as sent to clients
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_description: Option<String>,
}

impl AppError {
    /// Get error code for the client
    fn code(&self) -> &'static str {
        match self {
            AppError::InvalidHeader => "invalid_header",
            AppError::InvalidGrant => "invalid_grant",
            AppError::Forbidden => "forbidden",
            AppError::NotFound => "not_found",
            AppError::InvalidRequest(_) => "invalid_request",
            AppError::Database(_) => "database_error",
            AppError::Cache(_) => "cache_error",
            AppError::Internal(_) => "internal_error",
        }
    }

    /// Get HTTP status code
    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidHeader | AppError::InvalidGrant | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Cache(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get user-facing description (hides internal details)
    fn description(&self) -> Option<String> {
        match self {
            AppError::InvalidRequest(msg) => Some(msg.clone()),
            AppError::InvalidHeader | AppError::InvalidGrant => Some(self.to_string()),
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                None
            }
            AppError::Cache(msg) => {
                tracing::error!("Cache error: {}", msg);
                None
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                None
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.code().to_string(),
            error_description: self.description(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        tracing::debug!("JWT rejected: {:?}", e);
        AppError::InvalidGrant
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        AppError::InvalidRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
