//! # Auth Gate Tests
//!
//! Every rejection by the gate must be indistinguishable to the client.

use super::*;

async fn assert_denied(response: Response<Body>) -> serde_json::Value {
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = read_json(response).await;
    assert_eq!(body, json!({ "error": "permission denied", "code": "PermissionDenied" }));
    body
}

#[tokio::test]
async fn test_missing_token_is_denied() {
    let (app, _pool, _uploads) = test_app().await;

    let response = send(
        &app,
        Request::builder().uri(profile_uri()).body(Body::empty()).unwrap(),
    )
    .await;

    assert_denied(response).await;
}

#[tokio::test]
async fn test_rejections_share_one_body() {
    // Arrange
    let (app, pool, _uploads) = test_app().await;
    let (user, valid) = seed_user(&pool, "a@b.com").await;

    let expired = lib_auth::issue_token(user.id, TEST_SECRET, -10).unwrap().token;
    let foreign = lib_auth::issue_token(user.id, "another-secret-that-is-at-least-32-chars", 3600)
        .unwrap()
        .token;
    let unknown_user = test_tokens().issue(user.id + 100).unwrap().token;

    let mut parts: Vec<&str> = valid.split('.').collect();
    let tampered_payload = lib_utils::b64u_encode(r#"{"sub":"999","exp":9999999999,"iat":0}"#);
    parts[1] = tampered_payload.as_str();
    let tampered = parts.join(".");

    // Act + Assert
    let mut bodies = Vec::new();
    for token in ["garbage", expired.as_str(), foreign.as_str(), unknown_user.as_str(), tampered.as_str()] {
        let response = send(&app, get_with_bearer(&profile_uri(), token)).await;
        bodies.push(assert_denied(response).await);
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_deleted_user_is_denied() {
    let (app, pool, _uploads) = test_app().await;
    let (user, token) = seed_user(&pool, "a@b.com").await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user.id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send(&app, get_with_bearer(&profile_uri(), &token)).await;
    assert_denied(response).await;
}

#[tokio::test]
async fn test_broken_store_is_denied() {
    // Arrange
    let (app, pool, _uploads) = test_app().await;
    let (_user, token) = seed_user(&pool, "a@b.com").await;
    sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();

    // Act
    let response = send(&app, get_with_bearer(&profile_uri(), &token)).await;

    // Assert
    assert_denied(response).await;
}

#[tokio::test]
async fn test_malformed_authorization_header_does_not_fall_back() {
    let (app, pool, _uploads) = test_app().await;
    let (_user, token) = seed_user(&pool, "a@b.com").await;

    let response = send(
        &app,
        Request::builder()
            .uri(format!("{}?token={}", profile_uri(), token))
            .header("authorization", format!("Token {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_denied(response).await;
}

#[tokio::test]
async fn test_token_sources() {
    let (app, pool, _uploads) = test_app().await;
    let (user, token) = seed_user(&pool, "a@b.com").await;

    let bearer = get_with_bearer(&profile_uri(), &token);
    let query = Request::builder()
        .uri(format!("{}?token={}", profile_uri(), token))
        .body(Body::empty())
        .unwrap();
    let cookie = Request::builder()
        .uri(profile_uri())
        .header("cookie", format!("theme=dark; token={token}"))
        .body(Body::empty())
        .unwrap();

    for req in [bearer, query, cookie] {
        let response = send(&app, req).await;
        assert_eq!(response.status(), StatusCode::OK);
        let profile: UserInfo = read_json(response).await;
        assert_eq!(profile.id, user.id);
    }
}

#[tokio::test]
async fn test_public_routes_need_no_token() {
    let (app, _pool, _uploads) = test_app().await;

    let response = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(crate::middleware::REQUEST_ID_HEADER));

    let response = send(
        &app,
        Request::builder().uri("/nowhere").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
