//! # Profile Handlers
//!
//! Handlers for the authenticated user's own profile. Every route here sits
//! behind the auth gate, so the [`Ctx`] extractor always succeeds.

use crate::server::{AppState, UPLOADS_PATH};
use axum::extract::{
    multipart::MultipartRejection, rejection::JsonRejection, Json, Multipart, State,
};
use lib_core::dto::{UpdateProfileRequest, UserInfo};
use lib_core::{AppError, Ctx, Result, UserStore};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Largest accepted profile picture, in bytes.
pub const MAX_PICTURE_BYTES: usize = 5 * 1024 * 1024;

/// Multipart field carrying the picture.
pub const PICTURE_FIELD: &str = "file";

/// Get profile handler - returns the authenticated user.
///
/// # Returns
///
/// * `200 OK` with [`UserInfo`]
/// * `404` if the user disappeared after the gate resolved it
pub async fn get_profile(
    State(store): State<Arc<dyn UserStore>>,
    ctx: Ctx,
) -> Result<Json<UserInfo>> {
    debug!("[PROFILE] Fetching user id: {}", ctx.user_id());

    let user = store
        .get_by_id(ctx.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", ctx.user_id())))?;

    Ok(Json(UserInfo::from(user)))
}

/// Update profile handler - replaces first name, last name and email.
///
/// # Returns
///
/// * `200 OK` with the updated [`UserInfo`]
/// * `400` validation error for a missing field or malformed email
/// * `400` conflict when the email belongs to another user
pub async fn update_profile(
    State(store): State<Arc<dyn UserStore>>,
    ctx: Ctx,
    payload: std::result::Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserInfo>> {
    let Json(req) = payload?;

    info!("[PROFILE] Update requested by user id: {}", ctx.user_id());

    req.validate()?;

    if let Some(owner) = store.get_by_email(&req.email).await? {
        if owner.id != ctx.user_id() {
            warn!("[PROFILE] Email already taken: {}", req.email);
            return Err(AppError::Conflict(format!(
                "user with email {} already exists",
                req.email
            )));
        }
    }

    let user = store.update(ctx.user_id(), req.into()).await?;

    info!("[PROFILE] User updated. ID: {}", user.id);

    Ok(Json(UserInfo::from(user)))
}

/// Upload profile picture handler.
///
/// Expects a multipart form with an image in the `file` field. The image is
/// written to the upload directory under a fresh name and its public path
/// (`/uploads/<name>`) is stored on the user. The picture it replaces is
/// deleted from disk, and the new file is deleted again if the path update
/// fails.
///
/// # Returns
///
/// * `200 OK` with the updated [`UserInfo`]
/// * `400` if the field is missing, not an accepted image type, or too large
pub async fn upload_profile_picture(
    State(state): State<AppState>,
    ctx: Ctx,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<UserInfo>> {
    let mut multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;

    info!("[PICTURE] Upload requested by user id: {}", ctx.user_id());

    let mut picture = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() != Some(PICTURE_FIELD) {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let Some(ext) = image_extension(&content_type) else {
            warn!("[PICTURE] Rejected content type: {:?}", content_type);
            return Err(AppError::Validation(format!(
                "unsupported file type {:?}, expected png, jpeg, gif or webp",
                content_type
            )));
        };

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        picture = Some((ext, data));
        break;
    }

    let Some((ext, data)) = picture else {
        return Err(AppError::Validation(format!(
            "missing multipart field '{}'",
            PICTURE_FIELD
        )));
    };

    if data.is_empty() {
        return Err(AppError::Validation("file is empty".to_string()));
    }
    if data.len() > MAX_PICTURE_BYTES {
        warn!("[PICTURE] File too large: {} bytes", data.len());
        return Err(AppError::Validation(format!(
            "file exceeds {} bytes",
            MAX_PICTURE_BYTES
        )));
    }

    let previous = state
        .store
        .get_by_id(ctx.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", ctx.user_id())))?
        .profile_picture;

    let file_name = format!("{}.{}", uuid::Uuid::new_v4(), ext);
    let file_path = state.upload_dir.join(&file_name);

    debug!("[PICTURE] Writing {} bytes to {:?}", data.len(), file_path);
    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {}", e)))?;

    let public_path = format!("{}/{}", UPLOADS_PATH, file_name);
    if let Err(e) = state
        .store
        .update_profile_picture_path(ctx.user_id(), &public_path)
        .await
    {
        warn!("[PICTURE] Path update failed, discarding {:?}", file_path);
        remove_upload(&file_path).await;
        return Err(e);
    }

    // The replaced picture is no longer referenced by anyone.
    if let Some(old_path) = previous
        .as_deref()
        .and_then(|p| stored_upload_path(&state.upload_dir, p))
    {
        remove_upload(&old_path).await;
    }

    let user = state
        .store
        .get_by_id(ctx.user_id())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", ctx.user_id())))?;

    info!("[PICTURE] Stored {} for user id: {}", public_path, user.id);

    Ok(Json(UserInfo::from(user)))
}

/// On-disk location of a public `/uploads/<name>` path, if it names a
/// plain file directly inside `upload_dir`.
fn stored_upload_path(upload_dir: &Path, public_path: &str) -> Option<PathBuf> {
    let name = public_path.strip_prefix(UPLOADS_PATH)?.strip_prefix('/')?;

    if name.is_empty() || name.starts_with('.') || name.contains(['/', '\\']) {
        return None;
    }

    Some(upload_dir.join(name))
}

async fn remove_upload(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("[PICTURE] Removed {:?}", path),
        Err(e) => warn!("[PICTURE] Failed to remove {:?}: {}", path, e),
    }
}

/// File extension for an accepted image content type.
fn image_extension(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/png" => Some("png"),
        "image/jpeg" => Some("jpg"),
        "image/gif" => Some("gif"),
        "image/webp" => Some("webp"),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
