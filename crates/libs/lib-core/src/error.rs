//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`AppError`] used consistently
//! across all backend modules. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Client Errors** (4xx) - User/input issues
//!    - [`Validation`](AppError::Validation) → 400 Bad Request
//!    - [`InvalidCredentials`](AppError::InvalidCredentials) → 400 Bad Request
//!    - [`Conflict`](AppError::Conflict) → 400 Bad Request
//!    - [`PermissionDenied`](AppError::PermissionDenied) → 401 Unauthorized
//!    - [`NotFound`](AppError::NotFound) → 404 Not Found
//!
//! 2. **Server Errors** (5xx) - Internal/system issues
//!    - [`Config`](AppError::Config) → 500 Internal Server Error
//!    - [`Internal`](AppError::Internal) → 500 Internal Server Error
//!
//! ## Credential and Permission Errors
//!
//! `InvalidCredentials` and `PermissionDenied` carry no detail. An unknown
//! email and a wrong password produce the same body, and every rejection by
//! the auth gate (missing, malformed, tampered or expired token, deleted
//! user) produces the same body.
//!
//! ## Error Conversion
//!
//! - `From<sqlx::Error>` - UNIQUE violations become `Conflict`, missing rows `NotFound`
//! - `From<lib_auth::token::Error>` - always `PermissionDenied`
//! - `From<lib_auth::pwd::Error>` - `Internal`
//! - `From<JsonRejection>` - `Validation`
//! - `From<anyhow::Error>` / `From<serde_json::Error>`

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";
pub const PERMISSION_DENIED_MESSAGE: &str = "permission denied";

/// Application-wide error type covering all error scenarios.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request body has the wrong shape or breaks a field constraint.
    #[error("Invalid payload: {0}")]
    Validation(String),

    /// Login failed. Deliberately says nothing about which check failed.
    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    /// Auth gate rejected the request.
    #[error("{}", PERMISSION_DENIED_MESSAGE)]
    PermissionDenied,

    /// A unique resource already exists.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Requested resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal server error (unexpected failures).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidCredentials | AppError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::PermissionDenied => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Config(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get a user-friendly error message.
    ///
    /// For internal errors, returns a generic message to avoid exposing implementation details.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => format!("invalid payload: {}", msg),
            AppError::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            AppError::PermissionDenied => PERMISSION_DENIED_MESSAGE.to_string(),
            AppError::Conflict(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Config(_) | AppError::Internal(_) => "An internal error occurred".to_string(),
        }
    }

    /// Stable machine-readable code, the variant name.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "Config",
            AppError::Validation(_) => "Validation",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::PermissionDenied => "PermissionDenied",
            AppError::Conflict(_) => "Conflict",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal(_) => "Internal",
        }
    }
}

/// Implement Axum's `IntoResponse` for automatic error handling.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("Server error: {}", self);
        } else {
            tracing::debug!("Client error: {}", self);
        }

        let body = Json(json!({
            "error": self.user_message(),
            "code": self.code(),
        }));

        (status, body).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Convert `sqlx::Error` to `AppError`.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Database record not found".to_string()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Resource already exists".to_string())
            }
            sqlx::Error::Database(db_err) => {
                AppError::Internal(format!("Database error: {}", db_err.message()))
            }
            _ => AppError::Internal(format!("Database error: {}", err)),
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Body extraction failures (bad JSON, wrong content type) are client errors.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<lib_auth::token::Error> for AppError {
    fn from(err: lib_auth::token::Error) -> Self {
        match err {
            lib_auth::token::Error::Encode(msg) => AppError::Internal(msg),
            _ => AppError::PermissionDenied,
        }
    }
}

impl From<lib_auth::pwd::Error> for AppError {
    fn from(err: lib_auth::pwd::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
