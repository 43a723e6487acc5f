use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;

use crate::auth::middleware::AdminSession;
use crate::error::{ApiError, ApiResult};
use crate::storage::BlobStore;

/// Largest accepted upload (5 MiB).
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/webp", "image/gif"];

const FILE_FIELD: &str = "file";

struct UploadedFile {
    filename: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// POST /api/uploads — store an image and return its public URL.
///
/// Expects a multipart form with a `file` field. Requires an admin session
/// even when mounted without the route guard.
pub async fn upload_image(
    admin: AdminSession,
    store: web::Data<dyn BlobStore>,
    mut payload: Multipart,
) -> ApiResult<HttpResponse> {
    let mut upload = None;

    while let Some(mut field) = payload.try_next().await.map_err(invalid_form)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
        else {
            continue;
        };

        let content_type = check_content_type(field.content_type().map(|m| m.essence_str()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(invalid_form)? {
            check_size(bytes.len() + chunk.len())?;
            bytes.extend_from_slice(&chunk);
        }

        upload = Some(UploadedFile {
            filename,
            content_type: content_type.to_string(),
            bytes,
        });
        break;
    }

    let file = upload.ok_or_else(|| ApiError::bad_request("File is required"))?;

    let pathname = format!(
        "projects/{}-{}",
        chrono::Utc::now().timestamp_millis(),
        sanitize_filename(&file.filename)
    );
    let size = file.bytes.len();

    let url = store
        .put(&pathname, &file.content_type, file.bytes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, %pathname, "Failed to upload image");
            ApiError::Internal("Failed to upload image".into())
        })?;

    tracing::info!(%pathname, size, user_id = %admin.0.sub, "Image uploaded");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "url": url })))
}

fn invalid_form(err: actix_multipart::MultipartError) -> ApiError {
    tracing::debug!(error = %err, "Malformed upload form");
    ApiError::bad_request("Invalid multipart data")
}

fn check_content_type(content_type: Option<&str>) -> ApiResult<&'static str> {
    content_type
        .and_then(|ct| ALLOWED_IMAGE_TYPES.iter().copied().find(|allowed| *allowed == ct))
        .ok_or_else(|| ApiError::bad_request("Unsupported file type. Use JPG, PNG, WEBP, or GIF."))
}

fn check_size(size: usize) -> ApiResult<()> {
    if size > MAX_FILE_SIZE {
        return Err(ApiError::bad_request("File size must not exceed 5MB."));
    }
    Ok(())
}

/// Keep the base name only, replacing anything outside `[A-Za-z0-9._-]`.
fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');

    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_listed_image_types_pass() {
        assert_eq!(check_content_type(Some("image/png")).unwrap(), "image/png");
        assert_eq!(check_content_type(Some("image/webp")).unwrap(), "image/webp");
        assert!(check_content_type(Some("image/svg+xml")).is_err());
        assert!(check_content_type(Some("application/pdf")).is_err());
        assert!(check_content_type(None).is_err());
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_size(MAX_FILE_SIZE).is_ok());
        assert!(check_size(MAX_FILE_SIZE + 1).is_err());
    }

    #[test]
    fn filenames_are_flattened_and_cleaned() {
        assert_eq!(sanitize_filename("hero shot.png"), "hero-shot.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("C:\\Users\\me\\photo.jpg"), "photo.jpg");
        assert_eq!(sanitize_filename("..."), "upload");
        assert_eq!(sanitize_filename("ภาพ.webp"), "---.webp");
    }
}
