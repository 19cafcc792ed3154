//! # Authentication Library
//!
//! Password hashing and stateless session token management.

pub mod pwd;
pub mod token;

// Re-export commonly used types
pub use pwd::{hash_password, verify_dummy_password, verify_password};
pub use token::{issue_token, verify_token, verify_token_at, Claims, IssuedToken, TokenConfig};
