//! Tag model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use kb_core::types::{DbId, Timestamp};

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// One `(article, tag name)` pair from the batched tag lookup.
#[derive(Debug, Clone, FromRow)]
pub struct ArticleTagName {
    pub article_id: DbId,
    pub name: String,
}

/// DTO for `POST /api/tags`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTag {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
}
