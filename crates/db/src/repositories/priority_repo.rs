//! Repository for the `priorities` table.

use sqlx::PgPool;
use kb_core::types::DbId;

use crate::models::taxonomy::{CreatePriority, Priority, UpdatePriority};

const COLUMNS: &str = "id, name, level, color, created_by, created_at";

/// Provides CRUD operations for priorities.
pub struct PriorityRepo;

impl PriorityRepo {
    /// List all priorities, most urgent first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Priority>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM priorities ORDER BY level DESC, name");
        sqlx::query_as::<_, Priority>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Priority>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM priorities WHERE id = $1");
        sqlx::query_as::<_, Priority>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &CreatePriority,
        created_by: Option<DbId>,
    ) -> Result<Priority, sqlx::Error> {
        let query = format!(
            "INSERT INTO priorities (name, level, color, created_by) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Priority>(&query)
            .bind(input.name.trim())
            .bind(input.level)
            .bind(&input.color)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Update a priority. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePriority,
    ) -> Result<Option<Priority>, sqlx::Error> {
        let query = format!(
            "UPDATE priorities SET \
                name = COALESCE($2, name), \
                level = COALESCE($3, level), \
                color = COALESCE($4, color) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Priority>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(input.level)
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM priorities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn is_in_use(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM articles WHERE priority_id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
