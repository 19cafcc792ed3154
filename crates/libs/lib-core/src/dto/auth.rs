//! # Authentication Data Transfer Objects
//!
//! Defines request and response structures for authentication endpoints.
//!
//! ## Endpoints Using These DTOs
//!
//! - `POST /chat-app-api/v1/register` - [`RegisterRequest`] -> [`UserInfo`](super::UserInfo)
//! - `POST /chat-app-api/v1/login` - [`LoginRequest`] -> [`LoginResponse`]
//!
//! ## Wire Format
//!
//! All DTOs use **camelCase** field names in JSON. Missing request fields
//! deserialize as empty strings and are then rejected by `validate()`, so a
//! missing field and an empty one produce the same validation error.
//!
//! ## Login Flow Example
//!
//! ```text
//! POST /chat-app-api/v1/login
//! Content-Type: application/json
//!
//! {
//!   "email": "alice@example.com",
//!   "password": "MyPassword123!"
//! }
//! ```
//!
//! Response (also sets an HTTP-only `token` cookie):
//! ```text
//! {
//!   "token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "expiresAt": 1735689600
//! }
//! ```

use crate::error::{AppError, Result};
use lib_utils::{validate_email, validate_length, validate_not_empty};
use serde::{Deserialize, Serialize};

/// Accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 3;
pub const PASSWORD_MAX_LEN: usize = 130;

/// Login request.
///
/// # Security Note
///
/// Password is sent in plaintext over HTTPS and must never be logged.
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.email, "Email").map_err(AppError::Validation)?;
        validate_email(&self.email).map_err(AppError::Validation)?;
        validate_not_empty(&self.password, "Password").map_err(AppError::Validation)?;
        Ok(())
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

/// Registration request.
///
/// # Validation Rules
///
/// - All fields are required
/// - Email must be well-formed and not already registered
/// - Password must be 3-130 characters
///
/// # JSON Example
///
/// ```json
/// {
///   "firstName": "Alice",
///   "lastName": "Liddell",
///   "email": "alice@example.com",
///   "password": "SecurePassword123!"
/// }
/// ```
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.first_name, "First name").map_err(AppError::Validation)?;
        validate_not_empty(&self.last_name, "Last name").map_err(AppError::Validation)?;
        validate_not_empty(&self.email, "Email").map_err(AppError::Validation)?;
        validate_email(&self.email).map_err(AppError::Validation)?;
        validate_length(&self.password, PASSWORD_MIN_LEN, PASSWORD_MAX_LEN, "Password")
            .map_err(AppError::Validation)?;
        Ok(())
    }
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"***REDACTED***")
            .finish()
    }
}

/// Successful login.
///
/// `expires_at` is the unix timestamp embedded in the token. The token
/// should be sent on later requests as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
}

/// Standard error response for all API endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}
