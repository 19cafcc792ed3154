//! # Authentication Handlers
//!
//! HTTP request handlers for registration and login.
//!
//! Login answers an unknown email and a wrong password identically, so the
//! endpoint cannot be used to discover which emails are registered.

use crate::middleware::TOKEN_COOKIE;
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
};
use lib_auth::{hash_password, verify_dummy_password, verify_password, IssuedToken, TokenConfig};
use lib_core::dto::{LoginRequest, LoginResponse, RegisterRequest, UserInfo};
use lib_core::model::store::UserForCreate;
use lib_core::{AppError, Result, UserStore};
use std::sync::Arc;
use tower_cookies::{cookie::SameSite, Cookie, Cookies};
use tracing::{debug, info, warn};

/// Register handler - creates a new user account.
///
/// # Returns
///
/// * `201 Created` with the new [`UserInfo`]
/// * `400` validation error for missing fields, a malformed email, or a
///   password outside 3-130 characters
/// * `400` conflict when the email is already registered
pub async fn register(
    State(store): State<Arc<dyn UserStore>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserInfo>)> {
    let Json(req) = payload?;

    info!("[REGISTER] NEW USER REGISTRATION REQUEST");
    debug!("   Email: {}", req.email);

    if let Err(e) = req.validate() {
        warn!("[REGISTER] Invalid payload: {}", e);
        return Err(e);
    }

    if store.get_by_email(&req.email).await?.is_some() {
        warn!("[REGISTER] Email already registered: {}", req.email);
        return Err(AppError::Conflict(format!(
            "user with email {} already exists",
            req.email
        )));
    }

    debug!("[REGISTER] Hashing password...");
    let password_hash = hash_password(&req.password)?;

    debug!("[REGISTER] Creating user in database...");
    let user = store
        .create(UserForCreate::new(
            req.first_name,
            req.last_name,
            req.email,
            password_hash,
        ))
        .await?;

    info!("[REGISTER] User created. ID: {}", user.id);

    Ok((StatusCode::CREATED, Json(UserInfo::from(user))))
}

/// Login handler - authenticates an existing user.
///
/// On success returns the token and its expiry, and sets the same token as
/// an HTTP-only cookie that expires with it.
///
/// # Returns
///
/// * `200 OK` with [`LoginResponse`]
/// * `400` validation error for a malformed payload
/// * `400 invalid email or password` for an unknown email or wrong password
pub async fn login(
    State(store): State<Arc<dyn UserStore>>,
    State(tokens): State<TokenConfig>,
    cookies: Cookies,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>> {
    let Json(req) = payload?;

    info!("[LOGIN] LOGIN ATTEMPT");
    debug!("   Email: {}", req.email);

    req.validate()?;

    let Some(user) = store.get_by_email(&req.email).await? else {
        warn!("[LOGIN] Unknown email: {}", req.email);
        verify_dummy_password(&req.password);
        return Err(AppError::InvalidCredentials);
    };

    debug!("[LOGIN] Verifying password...");
    if !verify_password(&req.password, &user.password_hash) {
        warn!("[LOGIN] Invalid password for user id: {}", user.id);
        return Err(AppError::InvalidCredentials);
    }

    debug!("[LOGIN] Issuing session token...");
    let issued = tokens.issue(user.id)?;

    cookies.add(token_cookie(&issued)?);

    info!("[LOGIN] User authenticated. ID: {}", user.id);

    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

/// HTTP-only session cookie expiring together with the token.
fn token_cookie(issued: &IssuedToken) -> Result<Cookie<'static>> {
    let expires = time::OffsetDateTime::from_unix_timestamp(issued.expires_at)
        .map_err(|e| AppError::Internal(format!("Token expiry out of range: {}", e)))?;

    Ok(Cookie::build((TOKEN_COOKIE, issued.token.clone()))
        .http_only(true)
        .path("/")
        .same_site(SameSite::Lax)
        .expires(expires)
        .build())
}

#[cfg(test)]
mod tests;
