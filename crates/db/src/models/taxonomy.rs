//! Category, department, and priority models and DTOs.
//!
//! All three taxonomies share the same lifecycle: anyone signed in may create
//! or edit an entry, only its creator or an admin may delete it, and an entry
//! still referenced by an article cannot be deleted.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use kb_core::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// A row from the `departments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Department {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// A row from the `priorities` table. Higher `level` means more urgent.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Priority {
    pub id: DbId,
    pub name: String,
    pub level: i32,
    pub color: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Create DTO shared by categories and departments.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateNamedEntry {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: Option<String>,
}

/// Update DTO shared by categories and departments.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateNamedEntry {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePriority {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub level: i32,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePriority {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,
    pub level: Option<i32>,
    pub color: Option<String>,
}
