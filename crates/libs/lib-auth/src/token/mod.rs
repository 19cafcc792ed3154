//! # Session Token Management
//!
//! Stateless HS256 session tokens: issuance, validation, and decoding.
//!
//! A token carries the user id (`sub`) and an absolute expiry (`exp`). It is
//! valid only while its signature matches the server secret and `now < exp`.
//! Nothing is stored server side, so a token cannot be revoked before it
//! expires.

use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lib_utils::{b64u_decode, now_unix};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only accepted signing scheme.
const ALGORITHM: Algorithm = Algorithm::HS256;
const ALGORITHM_NAME: &str = "HS256";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Token cannot be parsed")]
    Malformed,

    #[error("Token signature or algorithm is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    Expired,

    #[error("Failed to encode token: {0}")]
    Encode(String),
}

/// Token claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// A freshly signed token and the expiry embedded in it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: i64,
}

/// Signing secret and lifetime, fixed at startup.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    ttl_secs: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            ttl_secs,
        }
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for `user_id` valid for the configured lifetime.
    pub fn issue(&self, user_id: i64) -> Result<IssuedToken, Error> {
        issue_token(user_id, &self.secret, self.ttl_secs)
    }

    /// Verify a token and return the user id it was issued for.
    pub fn verify(&self, token: &str) -> Result<i64, Error> {
        verify_token(token, &self.secret)
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("secret", &"***REDACTED***")
            .field("ttl_secs", &self.ttl_secs)
            .finish()
    }
}

/// Issue a signed token for `user_id` that expires `ttl_secs` from now.
pub fn issue_token(user_id: i64, secret: &str, ttl_secs: i64) -> Result<IssuedToken, Error> {
    let now = now_unix();
    let expires_at = now + ttl_secs;

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expires_at,
        iat: now,
    };

    let token = encode(
        &Header::new(ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| Error::Encode(e.to_string()))?;

    Ok(IssuedToken { token, expires_at })
}

/// Verify a token against `secret` using the current clock.
pub fn verify_token(token: &str, secret: &str) -> Result<i64, Error> {
    verify_token_at(token, secret, now_unix())
}

/// Verify a token against `secret` as of `now` (unix seconds).
///
/// The token is expired once `now >= exp`; there is no leeway.
pub fn verify_token_at(token: &str, secret: &str, now: i64) -> Result<i64, Error> {
    check_algorithm(token)?;

    let mut validation = Validation::new(ALGORITHM);
    // Expiry is checked below against the caller's clock.
    validation.validate_exp = false;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            Error::InvalidSignature
        }
        ErrorKind::ExpiredSignature => Error::Expired,
        _ => Error::Malformed,
    })?;

    let claims = token_data.claims;

    if now >= claims.exp {
        return Err(Error::Expired);
    }

    claims.sub.parse::<i64>().map_err(|_| Error::Malformed)
}

// region:    --- Header inspection

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Reject tokens whose header names any algorithm but HS256.
///
/// Runs on the raw header so that names the JWT library cannot represent
/// (such as `none`) are still reported as an algorithm mismatch.
fn check_algorithm(token: &str) -> Result<(), Error> {
    let header_b64 = token.split('.').next().unwrap_or_default();
    let header_json = b64u_decode(header_b64).map_err(|_| Error::Malformed)?;
    let header: RawHeader = serde_json::from_slice(&header_json).map_err(|_| Error::Malformed)?;

    if header.alg != ALGORITHM_NAME {
        return Err(Error::InvalidSignature);
    }

    Ok(())
}

// endregion: --- Header inspection
