//! # Password Hashing
//!
//! Password hashing and verification using Argon2.
//!
//! Hashes are PHC strings carrying their own salt and parameters, so
//! verification needs nothing but the stored string.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use std::sync::LazyLock;
use thiserror::Error;

/// Hash of a throwaway password, built on first use.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("dummy-password-never-matches").ok());

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Hash a password using the Argon2 algorithm with a random salt.
pub fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| Error::Hash(e.to_string()))?
        .to_string();

    Ok(password_hash)
}

/// Verify a plaintext password against an Argon2 hash.
///
/// A malformed hash verifies as `false`.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Run a full verification against a throwaway hash and discard the result.
///
/// Login calls this when the email is unknown, so that path costs the same
/// Argon2 work as a wrong password.
pub fn verify_dummy_password(password: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(password, hash);
    }
}
