//! Article models, search projection, and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use kb_core::search::MatchField;
use kb_core::types::{DbId, Timestamp};

use crate::models::attachment::Attachment;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// An `articles` row joined with its taxonomy display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleRow {
    pub id: DbId,
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    pub author: Option<String>,
    pub author_id: Option<DbId>,
    pub views: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub category_name: Option<String>,
    pub department_name: Option<String>,
    pub priority_name: Option<String>,
    pub priority_color: Option<String>,
    pub priority_level: Option<i32>,
}

/// Full article as returned by list and detail endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    #[serde(flatten)]
    pub row: ArticleRow,
    /// Tag names, sorted by name.
    pub tags: Vec<String>,
    /// Newest first.
    pub attachments: Vec<Attachment>,
}

/// One search hit: the article plus its computed preview fields.
///
/// Derived on every search and never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    #[serde(flatten)]
    pub row: ArticleRow,
    pub tags: Vec<String>,
    pub snippet: String,
    #[serde(rename = "matchField")]
    pub match_field: MatchField,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Article count for one taxonomy entry.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NamedCount {
    pub name: String,
    pub count: i64,
}

/// Lightweight row for the "recently updated" list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentArticle {
    pub id: DbId,
    pub title: String,
    pub updated_at: Timestamp,
}

/// Response for `GET /api/articles/stats`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub total_articles: i64,
    pub total_views: i64,
    pub by_category: Vec<NamedCount>,
    pub by_department: Vec<NamedCount>,
    pub recent_articles: Vec<RecentArticle>,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/articles`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleFilter {
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub priority_id: Option<DbId>,
}

/// Request body for `POST /api/articles`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateArticleRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, rename = "attachmentIds")]
    pub attachment_ids: Vec<DbId>,
}

/// Request body for `PUT /api/articles/{id}`.
///
/// Scalar fields are replaced as given (`null` clears an optional field).
/// `tags` and `attachmentIds` follow a separate rule: absent or `null` leaves
/// the current set unchanged, an empty list clears it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(rename = "attachmentIds")]
    pub attachment_ids: Option<Vec<DbId>>,
}

/// DTO for inserting an article.
#[derive(Debug, Clone)]
pub struct CreateArticle {
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    pub author: Option<String>,
    pub author_id: Option<DbId>,
    pub tags: Vec<String>,
    pub attachment_ids: Vec<DbId>,
}

/// DTO for updating an article. `None` for `tags` / `attachment_ids` means
/// "leave unchanged".
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    pub title: String,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub category_id: Option<DbId>,
    pub department_id: Option<DbId>,
    pub priority_id: Option<DbId>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
    pub attachment_ids: Option<Vec<DbId>>,
}

impl CreateArticle {
    /// Build the insert DTO from a request, attributing it to the caller.
    pub fn from_request(input: CreateArticleRequest, author: String, author_id: DbId) -> Self {
        Self {
            title: input.title,
            summary: input.summary,
            content: input.content,
            category_id: input.category_id,
            department_id: input.department_id,
            priority_id: input.priority_id,
            author: Some(author),
            author_id: Some(author_id),
            tags: input.tags,
            attachment_ids: input.attachment_ids,
        }
    }
}

impl UpdateArticle {
    /// Build the update DTO, keeping `existing_author` when the request omits one.
    pub fn from_request(input: UpdateArticleRequest, existing_author: Option<String>) -> Self {
        Self {
            title: input.title,
            summary: input.summary,
            content: input.content,
            category_id: input.category_id,
            department_id: input.department_id,
            priority_id: input.priority_id,
            author: input.author.filter(|a| !a.is_empty()).or(existing_author),
            tags: input.tags,
            attachment_ids: input.attachment_ids,
        }
    }
}
