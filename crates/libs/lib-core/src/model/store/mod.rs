//! # Database Store
//!
//! Database connection pool, schema migrations, and the user store.
//!
//! [`UserStore`] is the storage capability the rest of the application
//! depends on. [`SqliteUserStore`] is the SQLite implementation.

// region: --- Modules
pub mod models;
pub mod user_repository;
// endregion: --- Modules

// region: --- Re-exports
pub use models::{User, UserForCreate, UserForUpdate};
pub use user_repository::SqliteUserStore;
// endregion: --- Re-exports

// region: --- Types and Functions
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{SqlitePool, sqlite::SqliteConnectOptions};
use std::path::Path;

/// Type alias for SQLite connection pool.
pub type DbPool = SqlitePool;

/// Create a new SQLite connection pool, creating the database file if missing.
pub async fn create_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let options = database_url
        .parse::<SqliteConnectOptions>()?
        .create_if_missing(true);

    let pool = SqlitePool::connect_with(options).await?;

    Ok(pool)
}

/// Apply the migrations found in `migrations_path`.
pub async fn run_migrations(pool: &DbPool, migrations_path: impl AsRef<Path>) -> anyhow::Result<()> {
    let migrator = sqlx::migrate::Migrator::new(migrations_path.as_ref()).await?;
    migrator.run(pool).await?;
    Ok(())
}

/// User directory.
///
/// Lookups return `Ok(None)` when no user matches. Storage failures are
/// `Err`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_by_id(&self, id: i64) -> Result<Option<User>>;

    /// Insert a new user. A duplicate email fails with `AppError::Conflict`.
    async fn create(&self, user: UserForCreate) -> Result<User>;

    /// Update name and email fields. Only `Some` fields change.
    async fn update(&self, id: i64, user: UserForUpdate) -> Result<User>;

    async fn update_profile_picture_path(&self, id: i64, path: &str) -> Result<()>;
}
// endregion: --- Types and Functions
