//! # Auth Handler Tests
//!
//! Test suite for registration and login handlers.

mod integration;

use crate::test_utils::{json_request, read_json, test_app};
use crate::API_PREFIX;
use axum::body::Body;
use axum::http::{Response, StatusCode};
use axum::Router;
use lib_core::dto::{ErrorResponse, LoginResponse, UserInfo};
use serde_json::json;
use tower::ServiceExt;

pub fn register_body(email: &str, password: &str) -> serde_json::Value {
    json!({
        "firstName": "user",
        "lastName": "client",
        "email": email,
        "password": password,
    })
}

pub async fn post_register(app: &Router, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(json_request("POST", &format!("{API_PREFIX}/register"), &body))
        .await
        .unwrap()
}

pub async fn post_login(app: &Router, email: &str, password: &str) -> Response<Body> {
    app.clone()
        .oneshot(json_request(
            "POST",
            &format!("{API_PREFIX}/login"),
            &json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap()
}
