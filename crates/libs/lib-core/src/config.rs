//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The configuration is loaded once and passed explicitly to whatever needs it;
//! there is no global instance.
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! let config = Config::from_env()?;
//! config.validate()?;
//! let tokens = config.token_config();
//! # Ok::<(), lib_core::AppError>(())
//! ```

use crate::error::{AppError, Result};
use lib_auth::TokenConfig;
use lib_utils::envs::{self, get_env, get_env_or, get_env_parse};

const DEFAULT_DATABASE_URL: &str = "sqlite:data/chat.db";
const DEFAULT_UPLOAD_DIR: &str = "uploads";
const DEFAULT_JWT_EXPIRATION_SECS: i64 = 7 * 24 * 60 * 60;
const MAX_JWT_EXPIRATION_SECS: i64 = 30 * 24 * 60 * 60;
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// SQLite database connection URL
    pub database_url: String,

    /// Secret key for session token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub jwt_secret: String,

    /// Session token validity period in seconds
    ///
    /// Valid range: 1 second to 30 days
    pub jwt_expiration_secs: i64,

    /// Directory profile pictures are written to
    pub upload_dir: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = get_env_or("DATABASE_URL", DEFAULT_DATABASE_URL);

        let jwt_secret = get_env("JWT_SECRET")
            .map_err(|_| AppError::Config("JWT_SECRET must be set in environment".to_string()))?;

        let jwt_expiration_secs = match get_env_parse::<i64>("JWT_EXPIRATION_IN_SECONDS") {
            Ok(secs) => secs,
            Err(envs::Error::MissingEnv(_)) => DEFAULT_JWT_EXPIRATION_SECS,
            Err(envs::Error::WrongFormat(name)) => {
                return Err(AppError::Config(format!("{} must be a valid number", name)));
            }
        };

        let upload_dir = get_env_or("UPLOAD_DIR", DEFAULT_UPLOAD_DIR);

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_expiration_secs,
            upload_dir,
        })
    }

    /// Validate configuration values against security rules.
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(AppError::Config(format!(
                "JWT_SECRET must be at least {} characters long",
                MIN_JWT_SECRET_LEN
            )));
        }

        if self.jwt_expiration_secs < 1 || self.jwt_expiration_secs > MAX_JWT_EXPIRATION_SECS {
            return Err(AppError::Config(format!(
                "JWT_EXPIRATION_IN_SECONDS must be between 1 and {} (30 days)",
                MAX_JWT_EXPIRATION_SECS
            )));
        }

        Ok(())
    }

    /// Token signing settings derived from this configuration.
    pub fn token_config(&self) -> TokenConfig {
        TokenConfig::new(self.jwt_secret.clone(), self.jwt_expiration_secs)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"***REDACTED***")
            .field("jwt_expiration_secs", &self.jwt_expiration_secs)
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}
