//! # User Repository
//!
//! SQLite implementation of [`UserStore`].
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::model::store::{create_pool, SqliteUserStore, UserForCreate, UserStore};
//! # async fn example() -> lib_core::Result<()> {
//! let pool = create_pool("sqlite::memory:").await?;
//! let store = SqliteUserStore::new(pool);
//!
//! let user = store
//!     .create(UserForCreate::new(
//!         "Ada".to_string(),
//!         "Lovelace".to_string(),
//!         "ada@example.com".to_string(),
//!         "hashed_password".to_string(),
//!     ))
//!     .await?;
//!
//! let found = store.get_by_email("ada@example.com").await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

use super::models::{User, UserForCreate, UserForUpdate};
use super::{DbPool, UserStore};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use sqlx::query_as;

const SELECT_USER: &str = "SELECT id, first_name, last_name, email, password_hash, profile_picture, created_at FROM users";

/// User store backed by a SQLite pool.
#[derive(Clone)]
pub struct SqliteUserStore {
    pool: DbPool,
}

impl SqliteUserStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = query_as::<_, User>(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = query_as::<_, User>(&format!("{SELECT_USER} WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<User>> {
        self.fetch_by_id(id).await
    }

    async fn create(&self, user: UserForCreate) -> Result<User> {
        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, email, password_hash) VALUES (?, ?, ?, ?)",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .execute(&self.pool)
        .await
        .map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => {
                AppError::Conflict(format!("user with email {} already exists", user.email))
            }
            other => other,
        })?;

        let id = result.last_insert_rowid();

        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Created user {} could not be read back", id)))
    }

    async fn update(&self, id: i64, user: UserForUpdate) -> Result<User> {
        if user.is_empty() {
            return self
                .fetch_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)));
        }

        // Build update query dynamically
        let mut updates = Vec::new();

        if user.first_name.is_some() {
            updates.push("first_name = ?");
        }
        if user.last_name.is_some() {
            updates.push("last_name = ?");
        }
        if user.email.is_some() {
            updates.push("email = ?");
        }

        let query_str = format!("UPDATE users SET {} WHERE id = ?", updates.join(", "));
        let mut query = sqlx::query(&query_str);

        if let Some(ref first_name) = user.first_name {
            query = query.bind(first_name);
        }
        if let Some(ref last_name) = user.last_name {
            query = query.bind(last_name);
        }
        if let Some(ref email) = user.email {
            query = query.bind(email);
        }

        let result = query.bind(id).execute(&self.pool).await.map_err(|e| match AppError::from(e) {
            AppError::Conflict(_) => AppError::Conflict(format!(
                "user with email {} already exists",
                user.email.as_deref().unwrap_or_default()
            )),
            other => other,
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        self.fetch_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    async fn update_profile_picture_path(&self, id: i64, path: &str) -> Result<()> {
        let result = sqlx::query("UPDATE users SET profile_picture = ? WHERE id = ?")
            .bind(path)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }
}
