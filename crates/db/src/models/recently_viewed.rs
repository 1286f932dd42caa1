//! Recently viewed history model.

use serde::Serialize;
use sqlx::FromRow;
use kb_core::types::{DbId, Timestamp};

/// One history entry joined with the article's display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecentlyViewedEntry {
    pub article_id: DbId,
    pub viewed_at: Timestamp,
    pub title: String,
    pub summary: Option<String>,
    /// Category name, if the article has one.
    pub category: Option<String>,
    /// Department name, if the article has one.
    pub department: Option<String>,
}
