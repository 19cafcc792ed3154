//! # Authentication Middleware
//!
//! Axum middleware gating protected routes on a valid session token.
//!
//! The gate:
//!
//! 1. extracts a candidate token from the request ([`extract_token`]),
//! 2. verifies it and resolves the user it names ([`authorize`]),
//! 3. inserts a [`Ctx`] into the request extensions and runs the handler.
//!
//! Every failure, whatever its cause, yields the same `401 permission denied`
//! response and the handler never runs. The specific reason is only logged.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use axum::{middleware, routing::get, Router};
//! use lib_web::middleware::require_auth;
//!
//! let app = Router::new()
//!     .route("/profile", get(get_profile))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_auth))
//!     .with_state(state);
//! ```
//!
//! Handlers then take the identity as an extractor:
//!
//! ```rust,ignore
//! use lib_core::Ctx;
//!
//! async fn get_profile(ctx: Ctx) -> String {
//!     format!("Hello, user {}!", ctx.user_id())
//! }
//! ```

use crate::server::AppState;
use axum::{
    extract::{Query, Request, State},
    http::header::{AUTHORIZATION, COOKIE},
    middleware::Next,
    response::Response,
};
use lib_auth::TokenConfig;
use lib_core::{AppError, Ctx, UserStore};
use serde::Deserialize;
use tower_cookies::Cookie;
use tracing::{debug, warn};

/// Name of the cookie login sets and the gate accepts.
pub const TOKEN_COOKIE: &str = "token";

#[derive(Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Extract the candidate session token from a request.
///
/// Order of precedence:
/// - `Authorization` header. When present it must read `Bearer <token>`;
///   any other form yields an empty candidate without trying the fallbacks.
/// - `token` query parameter.
/// - `token` cookie.
///
/// Returns an empty string when no token is found.
pub fn extract_token<B>(req: &axum::http::Request<B>) -> String {
    if let Some(value) = req.headers().get(AUTHORIZATION) {
        let value = value.to_str().unwrap_or_default();
        return match value.split_once(' ') {
            Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => {
                token.to_string()
            }
            _ => {
                debug!("[AUTH] Unrecognized Authorization header format");
                String::new()
            }
        };
    }

    if let Some(token) = Query::<TokenQuery>::try_from_uri(req.uri())
        .ok()
        .and_then(|Query(q)| q.token)
        .filter(|t| !t.is_empty())
    {
        return token;
    }

    req.headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(|cookie| cookie.ok())
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .unwrap_or_default()
}

/// Verify `token` and resolve the user it was issued for.
///
/// Every failure is `PermissionDenied`: a bad token, an unknown user, or a
/// store error during the lookup.
pub async fn authorize(
    token: &str,
    tokens: &TokenConfig,
    store: &dyn UserStore,
) -> Result<Ctx, AppError> {
    let user_id = tokens.verify(token).map_err(|e| {
        warn!("[AUTH] Token rejected: {}", e);
        AppError::PermissionDenied
    })?;

    match store.get_by_id(user_id).await {
        Ok(Some(user)) => {
            debug!("[AUTH] Authenticated user id: {}", user.id);
            Ok(Ctx::new(user.id))
        }
        Ok(None) => {
            warn!("[AUTH] Token names unknown user id: {}", user_id);
            Err(AppError::PermissionDenied)
        }
        Err(e) => {
            warn!("[AUTH] User lookup failed for id {}: {}", user_id, e);
            Err(AppError::PermissionDenied)
        }
    }
}

/// Authentication middleware for protected routes.
///
/// - **Valid token, existing user**: continues with `Ctx` in extensions
/// - **Anything else**: `401` with `{"error": "permission denied", ...}`
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&req);

    let ctx = authorize(&token, &state.tokens, state.store.as_ref()).await?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
