//! # User Data Transfer Objects
//!
//! Public user view and profile update payloads.

use crate::error::{AppError, Result};
use crate::model::store::{User, UserForUpdate};
use lib_utils::{validate_email, validate_not_empty};
use serde::{Deserialize, Serialize};

/// User information (public, safe to send to client).
///
/// Never includes the password hash.
///
/// # JSON Example
///
/// ```json
/// {
///   "id": 1,
///   "firstName": "Alice",
///   "lastName": "Liddell",
///   "email": "alice@example.com",
///   "profilePicture": "/uploads/3f0c....png",
///   "createdAt": "2024-01-01T00:00:00+00:00"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_picture: Option<String>,
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            profile_picture: user.profile_picture,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Profile update request. All fields are required.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.first_name, "First name").map_err(AppError::Validation)?;
        validate_not_empty(&self.last_name, "Last name").map_err(AppError::Validation)?;
        validate_not_empty(&self.email, "Email").map_err(AppError::Validation)?;
        validate_email(&self.email).map_err(AppError::Validation)?;
        Ok(())
    }
}

impl From<UpdateProfileRequest> for UserForUpdate {
    fn from(req: UpdateProfileRequest) -> Self {
        UserForUpdate::new()
            .first_name(req.first_name)
            .last_name(req.last_name)
            .email(req.email)
    }
}
