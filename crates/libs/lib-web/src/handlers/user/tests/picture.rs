//! # Profile Picture Tests

use super::*;

const BOUNDARY: &str = "----chat-test-boundary";

fn multipart_body(field: &str, content_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"avatar\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload(token: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("{API_PREFIX}/profile/picture"))
        .header("authorization", format!("Bearer {token}"))
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_upload_picture() {
    // Arrange
    let (app, pool, uploads) = test_app().await;
    let (user, token) = seed_user(&pool, "ada@example.com").await;
    let png = b"\x89PNG\r\n\x1a\nnot really a png";

    // Act
    let response = send(&app, upload(&token, multipart_body("file", "image/png", png))).await;

    // Assert
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserInfo = read_json(response).await;
    assert_eq!(updated.id, user.id);

    let path = updated.profile_picture.expect("Picture path should be set");
    assert!(path.starts_with("/uploads/"));
    assert!(path.ends_with(".png"));

    let file_name = path.trim_start_matches("/uploads/");
    let stored = std::fs::read(uploads.join(file_name)).unwrap();
    assert_eq!(stored, png);

    // Served back from the uploads route
    let response = send(
        &app,
        Request::builder().uri(&path).body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let served = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&served[..], png);

    std::fs::remove_dir_all(uploads).ok();
}

#[tokio::test]
async fn test_upload_rejects_non_image() {
    let (app, pool, uploads) = test_app().await;
    let (user, token) = seed_user(&pool, "ada@example.com").await;

    let response = send(
        &app,
        upload(&token, multipart_body("file", "text/plain", b"hello")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorResponse = read_json(response).await;
    assert_eq!(error.code, "Validation");

    let stored = SqliteUserStore::new(pool).get_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(stored.profile_picture, None);
    assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 0);

    std::fs::remove_dir_all(uploads).ok();
}

#[tokio::test]
async fn test_upload_requires_file_field() {
    let (app, pool, uploads) = test_app().await;
    let (_user, token) = seed_user(&pool, "ada@example.com").await;

    let response = send(
        &app,
        upload(&token, multipart_body("avatar", "image/png", b"data")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    std::fs::remove_dir_all(uploads).ok();
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    let (app, pool, uploads) = test_app().await;
    let (_user, token) = seed_user(&pool, "ada@example.com").await;
    let big = vec![0u8; crate::handlers::user::MAX_PICTURE_BYTES + 1];

    let response = send(&app, upload(&token, multipart_body("file", "image/png", &big))).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    std::fs::remove_dir_all(uploads).ok();
}

#[tokio::test]
async fn test_upload_requires_token() {
    let (app, _pool, uploads) = test_app().await;

    let response = send(&app, upload("", multipart_body("file", "image/png", b"x"))).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    std::fs::remove_dir_all(uploads).ok();
}

#[tokio::test]
async fn test_reupload_replaces_previous_file() {
    // Arrange
    let (app, pool, uploads) = test_app().await;
    let (_user, token) = seed_user(&pool, "ada@example.com").await;

    // Act
    let mut last = None;
    for content in [&b"first"[..], b"second", b"third"] {
        let response = send(&app, upload(&token, multipart_body("file", "image/png", content))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let updated: UserInfo = read_json(response).await;
        last = updated.profile_picture;
    }

    // Assert
    let files: Vec<_> = std::fs::read_dir(&uploads)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().into_string().unwrap())
        .collect();
    let last = last.expect("Picture path should be set");
    assert_eq!(files.len(), 1);
    assert_eq!(format!("/uploads/{}", files[0]), last);
    assert_eq!(std::fs::read(uploads.join(&files[0])).unwrap(), b"third");

    std::fs::remove_dir_all(uploads).ok();
}

/// Store whose picture path update always fails.
struct PathUpdateFails(SqliteUserStore);

#[async_trait::async_trait]
impl UserStore for PathUpdateFails {
    async fn get_by_email(&self, email: &str) -> lib_core::Result<Option<lib_core::model::store::User>> {
        self.0.get_by_email(email).await
    }

    async fn get_by_id(&self, id: i64) -> lib_core::Result<Option<lib_core::model::store::User>> {
        self.0.get_by_id(id).await
    }

    async fn create(&self, user: UserForCreate) -> lib_core::Result<lib_core::model::store::User> {
        self.0.create(user).await
    }

    async fn update(
        &self,
        id: i64,
        user: lib_core::model::store::UserForUpdate,
    ) -> lib_core::Result<lib_core::model::store::User> {
        self.0.update(id, user).await
    }

    async fn update_profile_picture_path(&self, id: i64, _path: &str) -> lib_core::Result<()> {
        Err(lib_core::AppError::NotFound(format!("User {} not found", id)))
    }
}

#[tokio::test]
async fn test_failed_path_update_discards_new_file() {
    // Arrange
    let (_app, pool, uploads) = test_app().await;
    let (_user, token) = seed_user(&pool, "ada@example.com").await;
    let state = crate::AppState {
        store: std::sync::Arc::new(PathUpdateFails(SqliteUserStore::new(pool))),
        tokens: test_tokens(),
        upload_dir: uploads.clone(),
    };
    let app = crate::create_router(state, vec!["*".to_string()]);

    // Act
    let response = send(&app, upload(&token, multipart_body("file", "image/png", b"png"))).await;

    // Assert
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(std::fs::read_dir(&uploads).unwrap().count(), 0);

    std::fs::remove_dir_all(uploads).ok();
}

#[test]
fn test_stored_upload_path_stays_inside_upload_dir() {
    use crate::handlers::user::stored_upload_path;
    let dir = std::path::Path::new("/srv/uploads");

    assert_eq!(
        stored_upload_path(dir, "/uploads/abc.png"),
        Some(dir.join("abc.png"))
    );
    for path in ["/uploads/", "/uploads/../etc/passwd", "/uploads/a/b.png", "/elsewhere/a.png", "abc.png"] {
        assert_eq!(stored_upload_path(dir, path), None, "path: {path}");
    }
}
