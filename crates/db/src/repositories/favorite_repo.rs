//! Repository for the `user_favorites` table.

use sqlx::PgPool;
use kb_core::types::DbId;

/// Per-user favorite articles.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Favorite article ids for a user, newest first.
    pub async fn list_article_ids(pool: &PgPool, user_id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT article_id FROM user_favorites \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Mark an article as favorite. Idempotent.
    ///
    /// Returns `true` if a new favorite was recorded.
    pub async fn add(pool: &PgPool, user_id: DbId, article_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO user_favorites (user_id, article_id) VALUES ($1, $2) \
             ON CONFLICT (user_id, article_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(article_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Returns `true` if a favorite was removed.
    pub async fn remove(
        pool: &PgPool,
        user_id: DbId,
        article_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM user_favorites WHERE user_id = $1 AND article_id = $2")
                .bind(user_id)
                .bind(article_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
