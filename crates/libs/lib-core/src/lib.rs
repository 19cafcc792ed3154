//! # Core Library
//!
//! Core models, user store, configuration, errors, and request context.

pub mod config;
pub mod ctx;
pub mod error;
pub mod model;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use ctx::Ctx;
pub use error::{AppError, Result};
pub use model::store::{DbPool, create_pool, SqliteUserStore, UserStore};
