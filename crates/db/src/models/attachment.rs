//! Attachment model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use kb_core::types::{DbId, Timestamp};

/// A row from the `attachments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Attachment {
    pub id: DbId,
    pub article_id: Option<DbId>,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size: Option<i64>,
    pub url: String,
    pub created_at: Timestamp,
}

/// DTO for recording an uploaded file.
#[derive(Debug, Clone)]
pub struct CreateAttachment {
    pub article_id: Option<DbId>,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub size: Option<i64>,
    pub url: String,
}
