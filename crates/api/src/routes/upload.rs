//! Media upload gateway.
//!
//! `POST /upload` takes a multipart form with `file`, `path`, and `action`
//! (`upload` by default, or `delete`). Only administrators get past the
//! extractor, and nothing reaches storage until the request validates.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;
use toonshelf_core::storage::StorageError;
use toonshelf_core::upload::{FileUpload, UploadOperation, UploadRequest};
use toonshelf_shared::AppError;
use tracing::info;

use crate::AppState;
use crate::error::ApiError;
use crate::middleware::AdminUser;

// ============================================================================
// Response Types
// ============================================================================

/// Body of a successful upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public CDN URL of the stored object.
    pub url: String,
    /// Storage host that accepted the write.
    pub storage_host_used: String,
    /// Region label of that host.
    pub detected_region: String,
}

/// Body of a successful delete.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    /// Always `true`.
    pub success: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// Creates upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

async fn upload(
    State(state): State<AppState>,
    admin: AdminUser,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let storage = state.storage.clone().ok_or(StorageError::NotConfigured)?;

    let form = read_form(multipart).await?;
    let operation = UploadOperation::parse(form.action.as_deref())?;

    match operation {
        UploadOperation::Remove => {
            let path = state.validator.validate_removal(form.path.as_deref())?;
            let removed = storage.remove(&path).await?;
            info!(
                email = admin.email(),
                path = %path,
                existed = removed.existed,
                "Media deleted"
            );
            Ok(Json(DeleteResponse { success: true }).into_response())
        }
        UploadOperation::Store => {
            let upload = state.validator.validate(UploadRequest {
                file: form.file,
                path: form.path,
                operation,
            })?;
            let stored = storage
                .store(&upload.path, upload.media_type.mime(), upload.data)
                .await?;
            info!(
                email = admin.email(),
                path = %upload.path,
                host = %stored.host_used,
                "Media uploaded"
            );
            Ok(Json(UploadResponse {
                url: stored.url,
                storage_host_used: stored.host_used,
                detected_region: stored.detected_region,
            })
            .into_response())
        }
    }
}

// ============================================================================
// Form Parsing
// ============================================================================

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<FileUpload>,
    path: Option<String>,
    action: Option<String>,
}

/// Collects the known form fields. Unknown fields are skipped; a repeated
/// field keeps its last value.
async fn read_form(mut multipart: Multipart) -> Result<UploadForm, ApiError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_form)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.map_err(invalid_form)?;
                form.file = Some(FileUpload {
                    filename,
                    content_type,
                    data,
                });
            }
            "path" => form.path = Some(field.text().await.map_err(invalid_form)?),
            "action" => form.action = Some(field.text().await.map_err(invalid_form)?),
            _ => {}
        }
    }

    Ok(form)
}

fn invalid_form(err: MultipartError) -> ApiError {
    ApiError(AppError::Validation(format!(
        "Invalid form data: {}",
        err.body_text()
    )))
}
