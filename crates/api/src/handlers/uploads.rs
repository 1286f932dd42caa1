//! Upload handlers: article attachments and inline images.
//!
//! Files are written to the configured upload directory under a generated
//! name and served back from `/uploads`.

use std::path::{Path, PathBuf};

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use kb_core::error::CoreError;
use kb_core::storage::{generate_stored_name, is_image_content_type, public_url};
use kb_core::types::DbId;
use kb_db::models::attachment::{Attachment, CreateAttachment};
use kb_db::repositories::{ArticleRepo, AttachmentRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Response for `POST /api/images`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadResponse {
    pub url: String,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size: i64,
}

/// The `file` part of a multipart upload.
struct UploadedFile {
    file_name: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Parsed multipart form: the file plus an optional `articleId`.
struct UploadForm {
    file: UploadedFile,
    article_id: Option<DbId>,
}

/// POST /api/attachments
///
/// Multipart with a required `file` part and an optional `articleId` field.
pub async fn upload_attachment(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<Attachment>)> {
    let form = read_upload_form(multipart).await?;

    if let Some(article_id) = form.article_id {
        if !ArticleRepo::exists(&state.pool, article_id).await? {
            return Err(AppError::Core(CoreError::NotFound {
                entity: "Article",
                id: article_id,
            }));
        }
    }

    let stored = store_file(&state, &form.file).await?;

    let created = AttachmentRepo::create(
        &state.pool,
        &CreateAttachment {
            article_id: form.article_id,
            file_name: form.file.file_name,
            mime_type: form.file.content_type,
            size: Some(form.file.data.len() as i64),
            url: stored.url.clone(),
        },
    )
    .await;

    let attachment = match created {
        Ok(attachment) => attachment,
        Err(e) => {
            discard_stored_file(&stored.path).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        attachment_id = attachment.id,
        article_id = ?attachment.article_id,
        user_id = auth.user_id,
        "Attachment uploaded"
    );

    Ok((StatusCode::CREATED, Json(attachment)))
}

/// POST /api/images
///
/// Accepts only `image/*` content types. Nothing is recorded in the database.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<ImageUploadResponse>)> {
    let form = read_upload_form(multipart).await?;

    if !is_image_content_type(form.file.content_type.as_deref()) {
        return Err(AppError::BadRequest("Only image files are allowed".into()));
    }

    let url = store_file(&state, &form.file).await?.url;
    let size = form.file.data.len() as i64;

    tracing::info!(user_id = auth.user_id, %url, size, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(ImageUploadResponse {
            url,
            file_name: form.file.file_name,
            mime_type: form.file.content_type,
            size,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn read_upload_form(mut multipart: Multipart) -> AppResult<UploadForm> {
    let mut file: Option<UploadedFile> = None;
    let mut article_id: Option<DbId> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file = Some(UploadedFile {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "articleId" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let text = text.trim();
                if !text.is_empty() {
                    let id = text
                        .parse::<DbId>()
                        .map_err(|_| AppError::BadRequest("articleId must be an integer".into()))?;
                    article_id = Some(id);
                }
            }
            _ => {} // ignore unknown fields
        }
    }

    let file = file.ok_or_else(|| AppError::BadRequest("No file uploaded".into()))?;
    Ok(UploadForm { file, article_id })
}

/// A file written to the upload directory.
struct StoredFile {
    path: PathBuf,
    url: String,
}

/// Write the file under a generated name.
async fn store_file(state: &AppState, file: &UploadedFile) -> AppResult<StoredFile> {
    let upload_dir = &state.config.upload_dir;
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

    let stored_name = generate_stored_name(&file.file_name);
    let path = upload_dir.join(&stored_name);
    tokio::fs::write(&path, &file.data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    Ok(StoredFile {
        path,
        url: public_url(&stored_name),
    })
}

/// Remove a stored file whose attachment row was never written.
async fn discard_stored_file(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove orphaned upload");
    }
}
