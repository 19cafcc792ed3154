use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// User entity representing a complete user record from the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub profile_picture: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Data structure for creating a new user.
///
/// Password must be hashed before creating.
#[derive(Debug, Clone)]
pub struct UserForCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
}

impl UserForCreate {
    /// Create a new `UserForCreate` instance.
    pub fn new(first_name: String, last_name: String, email: String, password_hash: String) -> Self {
        Self {
            first_name,
            last_name,
            email,
            password_hash,
        }
    }
}

/// Data structure for updating an existing user.
///
/// All fields are optional - only provided fields will be updated.
#[derive(Debug, Clone, Default)]
pub struct UserForUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

impl UserForUpdate {
    /// Create a new empty `UserForUpdate` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first name.
    pub fn first_name(mut self, first_name: String) -> Self {
        self.first_name = Some(first_name);
        self
    }

    /// Set the last name.
    pub fn last_name(mut self, last_name: String) -> Self {
        self.last_name = Some(last_name);
        self
    }

    /// Set the email.
    pub fn email(mut self, email: String) -> Self {
        self.email = Some(email);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.email.is_none()
    }
}
