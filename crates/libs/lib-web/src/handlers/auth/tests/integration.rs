//! # Auth Flow Tests
//!
//! Register, log in, then reach a gated route with the issued token.

use super::*;
use axum::http::Request;

#[tokio::test]
async fn test_register_login_profile_flow() {
    // Arrange
    let (app, _pool, _uploads) = test_app().await;
    let registered: UserInfo =
        read_json(post_register(&app, register_body("flow@example.com", "secret")).await).await;

    // Act
    let login: LoginResponse = read_json(post_login(&app, "flow@example.com", "secret").await).await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("{API_PREFIX}/profile"))
                .header("authorization", format!("Bearer {}", login.token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let profile: UserInfo = read_json(response).await;
    assert_eq!(profile, registered);
}

#[tokio::test]
async fn test_each_login_issues_a_working_token() {
    let (app, _pool, _uploads) = test_app().await;
    post_register(&app, register_body("a@b.com", "abc")).await;

    for _ in 0..2 {
        let login: LoginResponse = read_json(post_login(&app, "a@b.com", "abc").await).await;
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("{API_PREFIX}/profile?token={}", login.token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
