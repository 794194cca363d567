//! Image upload routes — multipart upload to object storage.
//!
//! Portfolio assets are images only; everything else is rejected server-side.

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Extension, Multipart, Path, State},
    middleware,
    routing::{delete, post},
};
use folio_common::error::{FolioError, FolioResult};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{AppState, middleware::AuthContext};

/// Image types the upload endpoint accepts.
fn is_allowed_content_type(ct: &str) -> bool {
    matches!(
        ct,
        "image/jpeg" | "image/png" | "image/gif" | "image/webp" | "image/svg+xml" | "image/avif"
    )
}

/// Slack on top of the per-file cap for multipart framing.
const BODY_OVERHEAD: usize = 64 * 1024;

/// Body cap for the uploads route. Axum's built-in 2 MB default would
/// otherwise reject large uploads before the handler's own size check runs.
fn body_limit(max_upload_bytes: usize) -> DefaultBodyLimit {
    DefaultBodyLimit::max(max_upload_bytes + BODY_OVERHEAD)
}

pub fn router() -> Router<Arc<AppState>> {
    let max_bytes = folio_common::config::get().limits.max_upload_bytes as usize;
    Router::new()
        .route("/uploads", post(upload_image))
        .route("/uploads/{*key}", delete(delete_upload))
        .route_layer(middleware::from_fn(crate::middleware::auth_middleware))
        .layer(body_limit(max_bytes))
}

#[derive(Serialize)]
struct UploadResponse {
    key: String,
    url: String,
    content_type: String,
    size: usize,
}

/// POST /api/v1/uploads — multipart/form-data with a `file` field.
///
/// The object lands under `uploads/{user_id}/` so ownership is encoded
/// in the key itself.
async fn upload_image(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> FolioResult<(axum::http::StatusCode, Json<UploadResponse>)> {
    let max_bytes = folio_common::config::get().limits.max_upload_bytes as usize;

    let mut file_data: Option<Vec<u8>> = None;
    let mut filename = String::from("upload");
    let mut content_type = String::from("application/octet-stream");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| FolioError::Validation {
            message: format!("Multipart error: {e}"),
        })?
    {
        if field.name() != Some("file") {
            continue;
        }

        if let Some(name) = field.file_name() {
            filename = sanitize_filename(name);
        }
        if let Some(ct) = field.content_type() {
            content_type = ct.to_string();
        }

        if !is_allowed_content_type(&content_type) {
            return Err(FolioError::Validation {
                message: format!("File type '{content_type}' is not allowed"),
            });
        }

        let bytes = field.bytes().await.map_err(|e| FolioError::Validation {
            message: format!("Failed to read file: {e}"),
        })?;

        if bytes.len() > max_bytes {
            return Err(FolioError::Validation {
                message: format!(
                    "File too large: {} bytes (max {max_bytes} bytes)",
                    bytes.len()
                ),
            });
        }

        file_data = Some(bytes.to_vec());
    }

    let data = file_data.ok_or(FolioError::Validation {
        message: "No file field in request".into(),
    })?;
    let size = data.len();

    let ext = filename.rsplit('.').next().unwrap_or("bin").to_lowercase();
    let key = format!("uploads/{}/{}.{}", auth.user_id, Uuid::new_v4(), ext);

    state
        .storage
        .put_object(&key, data, &content_type)
        .await
        .map_err(FolioError::Internal)?;

    let url = state
        .storage
        .presigned_get_url(&key, 3600 * 24 * 7)
        .await
        .map_err(FolioError::Internal)?;

    tracing::info!(key = %key, user_id = %auth.user_id, size, "Image uploaded");

    Ok((
        axum::http::StatusCode::CREATED,
        Json(UploadResponse {
            key,
            url,
            content_type,
            size,
        }),
    ))
}

/// DELETE /api/v1/uploads/*key — delete an owned object.
async fn delete_upload(
    Extension(auth): Extension<AuthContext>,
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> FolioResult<Json<serde_json::Value>> {
    // Keys are namespaced by uploader; anything outside your prefix is off-limits
    let own_prefix = format!("uploads/{}/", auth.user_id);
    if !key.starts_with(&own_prefix) {
        return Err(FolioError::Forbidden);
    }

    state
        .storage
        .delete_object(&key)
        .await
        .map_err(FolioError::Internal)?;

    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// Strip path separators and null bytes from filenames.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .take(255)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_separators() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "....etcpasswd");
        assert_eq!(sanitize_filename("photo.png"), "photo.png");
        assert_eq!(sanitize_filename("a\\b\0c.jpg"), "abc.jpg");
    }

    #[test]
    fn only_images_allowed() {
        assert!(is_allowed_content_type("image/png"));
        assert!(is_allowed_content_type("image/webp"));
        assert!(!is_allowed_content_type("application/pdf"));
        assert!(!is_allowed_content_type("video/mp4"));
    }

    #[tokio::test]
    async fn configured_cap_overrides_default_body_limit() {
        use axum::body::{Body, Bytes};
        use axum::http::{Request, StatusCode};
        use axum::routing::post;
        use tower::ServiceExt;

        let cap = 3 * 1024 * 1024;
        let app = axum::Router::new()
            .route("/echo", post(|body: Bytes| async move { body.len().to_string() }))
            .layer(body_limit(cap));

        // 2.5 MB — over axum's built-in 2 MB default, under the configured cap.
        let accepted = app
            .clone()
            .oneshot(
                Request::post("/echo")
                    .body(Body::from(vec![0u8; 2_621_440]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(accepted.status(), StatusCode::OK);

        // Over cap + framing slack — rejected.
        let rejected = app
            .oneshot(
                Request::post("/echo")
                    .body(Body::from(vec![0u8; cap + BODY_OVERHEAD + 1]))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(rejected.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
