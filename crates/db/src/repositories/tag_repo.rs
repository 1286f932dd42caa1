//! Repository for the `tags` and `article_tags` tables.

use std::collections::HashMap;

use sqlx::PgPool;
use kb_core::tags::normalize_tag_names;
use kb_core::types::DbId;

use crate::models::tag::{ArticleTagName, Tag};

/// Column list for `tags` queries.
const COLUMNS: &str = "id, name, created_by, created_at";

/// Provides tag CRUD and article-tag associations.
pub struct TagRepo;

impl TagRepo {
    // -----------------------------------------------------------------------
    // Tag CRUD
    // -----------------------------------------------------------------------

    /// List all tags ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags ORDER BY name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tags WHERE id = $1");
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a tag or return the existing one with the same name.
    ///
    /// The no-op `DO UPDATE` makes `RETURNING` yield the existing row on
    /// conflict; its `created_by` is left untouched.
    pub async fn create_or_get(
        pool: &PgPool,
        name: &str,
        created_by: Option<DbId>,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO tags (name, created_by) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(name.trim())
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Delete a tag. Cascade removes its article associations.
    ///
    /// Returns `true` if a tag was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Article-tag associations
    // -----------------------------------------------------------------------

    /// Tag names for a set of articles, in one query.
    ///
    /// Every requested id is present in the map; articles without tags map to
    /// an empty list. Names are sorted per article.
    pub async fn names_for_articles(
        pool: &PgPool,
        article_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<String>>, sqlx::Error> {
        let mut by_article: HashMap<DbId, Vec<String>> = article_ids
            .iter()
            .map(|&id| (id, Vec::new()))
            .collect();
        if article_ids.is_empty() {
            return Ok(by_article);
        }

        let rows = sqlx::query_as::<_, ArticleTagName>(
            "SELECT at.article_id, t.name \
             FROM article_tags at \
             JOIN tags t ON t.id = at.tag_id \
             WHERE at.article_id = ANY($1) \
             ORDER BY at.article_id, t.name",
        )
        .bind(article_ids)
        .fetch_all(pool)
        .await?;

        for row in rows {
            by_article.entry(row.article_id).or_default().push(row.name);
        }
        Ok(by_article)
    }

    /// Replace an article's tag set inside an open transaction.
    ///
    /// Missing tags are created and attributed to `created_by`.
    pub async fn replace_article_tags(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        article_id: DbId,
        names: &[String],
        created_by: Option<DbId>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM article_tags WHERE article_id = $1")
            .bind(article_id)
            .execute(&mut **tx)
            .await?;

        for name in normalize_tag_names(names) {
            let tag_id: DbId = sqlx::query_scalar(
                "INSERT INTO tags (name, created_by) VALUES ($1, $2) \
                 ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name \
                 RETURNING id",
            )
            .bind(&name)
            .bind(created_by)
            .fetch_one(&mut **tx)
            .await?;

            sqlx::query(
                "INSERT INTO article_tags (article_id, tag_id) VALUES ($1, $2) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(article_id)
            .bind(tag_id)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }
}
