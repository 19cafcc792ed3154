//! Shared fixtures for handler and middleware tests.

use crate::server::{create_router, AppState};
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use lib_auth::TokenConfig;
use lib_core::model::store::run_migrations;
use lib_core::{DbPool, SqliteUserStore};
use serde::de::DeserializeOwned;
use sqlx::sqlite::SqlitePoolOptions;
use std::path::PathBuf;
use std::sync::Arc;

pub const TEST_SECRET: &str = "test-secret-key-must-be-at-least-32-characters-long!";

/// In-memory database with the real migrations applied.
pub async fn setup_test_db() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    run_migrations(&pool, concat!(env!("CARGO_MANIFEST_DIR"), "/../../../migrations"))
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn setup_store() -> (Arc<SqliteUserStore>, DbPool) {
    let pool = setup_test_db().await;
    (Arc::new(SqliteUserStore::new(pool.clone())), pool)
}

pub fn test_tokens() -> TokenConfig {
    TokenConfig::new(TEST_SECRET, 3600)
}

/// A fresh, empty upload directory under the system temp dir.
pub fn test_upload_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("chat-api-test-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("Failed to create upload dir");
    dir
}

/// Full application router over an in-memory database.
pub async fn test_app() -> (Router, DbPool, PathBuf) {
    let (store, pool) = setup_store().await;
    let upload_dir = test_upload_dir();

    let state = AppState {
        store,
        tokens: test_tokens(),
        upload_dir: upload_dir.clone(),
    };

    (create_router(state, vec!["*".to_string()]), pool, upload_dir)
}

pub fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
