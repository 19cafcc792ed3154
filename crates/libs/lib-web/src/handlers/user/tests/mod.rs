//! # Profile Handler Tests
//!
//! Tests for the gated profile routes and the auth gate in front of them.

mod gate;
mod picture;

use crate::test_utils::{json_request, read_json, test_app, test_tokens, TEST_SECRET};
use crate::API_PREFIX;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use lib_core::dto::{ErrorResponse, UserInfo};
use lib_core::model::store::UserForCreate;
use lib_core::{DbPool, SqliteUserStore, UserStore};
use serde_json::json;
use tower::ServiceExt;

/// Insert a user directly and return it with a valid token.
pub async fn seed_user(pool: &DbPool, email: &str) -> (UserInfo, String) {
    let store = SqliteUserStore::new(pool.clone());
    let user = store
        .create(UserForCreate::new(
            "Ada".to_string(),
            "Lovelace".to_string(),
            email.to_string(),
            lib_auth::hash_password("abc").unwrap(),
        ))
        .await
        .unwrap();
    let token = test_tokens().issue(user.id).unwrap().token;
    (UserInfo::from(user), token)
}

pub fn get_with_bearer(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub fn profile_uri() -> String {
    format!("{API_PREFIX}/profile")
}
