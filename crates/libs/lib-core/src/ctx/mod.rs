//! # Request Context
//!
//! The authenticated identity of a single request.
//!
//! The auth gate inserts a [`Ctx`] into the request extensions after the
//! token and user have been verified. Handlers take it as an extractor:
//!
//! ```rust,ignore
//! async fn profile(ctx: Ctx) -> String {
//!     format!("user {}", ctx.user_id())
//! }
//! ```
//!
//! On a route without the gate there is no `Ctx`, and extraction fails with
//! permission denied.

use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctx {
    user_id: i64,
}

impl Ctx {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Ctx {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Ctx>()
            .cloned()
            .ok_or(AppError::PermissionDenied)
    }
}
