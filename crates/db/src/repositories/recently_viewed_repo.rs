//! Repository for the `recently_viewed` table.
//!
//! History is bounded per user: at most [`HISTORY_LIMIT`] entries, none older
//! than [`RETENTION_DAYS`]. Both bounds are enforced on every write and
//! applied again on read.

use sqlx::PgPool;
use kb_core::types::DbId;

use crate::models::recently_viewed::RecentlyViewedEntry;

/// Maximum entries kept per user.
pub const HISTORY_LIMIT: i64 = 20;

/// Entries older than this are dropped.
pub const RETENTION_DAYS: i32 = 3;

pub struct RecentlyViewedRepo;

impl RecentlyViewedRepo {
    /// A user's history, newest first, joined with article display fields.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RecentlyViewedEntry>, sqlx::Error> {
        sqlx::query_as::<_, RecentlyViewedEntry>(
            "SELECT rv.article_id, rv.viewed_at, a.title, a.summary, \
                    c.name AS category, d.name AS department \
             FROM recently_viewed rv \
             JOIN articles a ON a.id = rv.article_id \
             LEFT JOIN categories c ON c.id = a.category_id \
             LEFT JOIN departments d ON d.id = a.department_id \
             WHERE rv.user_id = $1 \
               AND rv.viewed_at > NOW() - make_interval(days => $2) \
             ORDER BY rv.viewed_at DESC, rv.id DESC \
             LIMIT $3",
        )
        .bind(user_id)
        .bind(RETENTION_DAYS)
        .bind(HISTORY_LIMIT)
        .fetch_all(pool)
        .await
    }

    /// Record or refresh a view, then trim and expire the user's history.
    pub async fn record(pool: &PgPool, user_id: DbId, article_id: DbId) -> Result<(), sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO recently_viewed (user_id, article_id, viewed_at) \
             VALUES ($1, $2, NOW()) \
             ON CONFLICT (user_id, article_id) DO UPDATE SET viewed_at = NOW()",
        )
        .bind(user_id)
        .bind(article_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM recently_viewed \
             WHERE user_id = $1 AND id NOT IN ( \
                 SELECT id FROM recently_viewed \
                 WHERE user_id = $1 \
                 ORDER BY viewed_at DESC, id DESC \
                 LIMIT $2 \
             )",
        )
        .bind(user_id)
        .bind(HISTORY_LIMIT)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "DELETE FROM recently_viewed \
             WHERE user_id = $1 AND viewed_at < NOW() - make_interval(days => $2)",
        )
        .bind(user_id)
        .bind(RETENTION_DAYS)
        .execute(&mut *tx)
        .await?;

        tx.commit().await
    }

    /// Remove a user's entire history. Returns the number of entries removed.
    pub async fn clear(pool: &PgPool, user_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recently_viewed WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
