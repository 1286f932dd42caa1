//! Repository for the `attachments` table.

use std::collections::HashMap;

use sqlx::PgPool;
use kb_core::types::DbId;

use crate::models::attachment::{Attachment, CreateAttachment};

const COLUMNS: &str = "id, article_id, file_name, mime_type, size, url, created_at";

/// Provides CRUD operations for uploaded attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Record an uploaded file, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttachment,
    ) -> Result<Attachment, sqlx::Error> {
        let query = format!(
            "INSERT INTO attachments (article_id, file_name, mime_type, size, url) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(input.article_id)
            .bind(&input.file_name)
            .bind(&input.mime_type)
            .bind(input.size)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attachments WHERE id = $1");
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Attachments for a set of articles, newest first, grouped by article.
    ///
    /// Every requested id is present in the map.
    pub async fn list_for_articles(
        pool: &PgPool,
        article_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Attachment>>, sqlx::Error> {
        let mut by_article: HashMap<DbId, Vec<Attachment>> = article_ids
            .iter()
            .map(|&id| (id, Vec::new()))
            .collect();
        if article_ids.is_empty() {
            return Ok(by_article);
        }

        let query = format!(
            "SELECT {COLUMNS} FROM attachments \
             WHERE article_id = ANY($1) \
             ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, Attachment>(&query)
            .bind(article_ids)
            .fetch_all(pool)
            .await?;

        for row in rows {
            if let Some(article_id) = row.article_id {
                by_article.entry(article_id).or_default().push(row);
            }
        }
        Ok(by_article)
    }

    /// Make `attachment_ids` the exact attachment set of an article.
    ///
    /// Attachments previously linked but not listed are detached (their
    /// `article_id` is cleared), not deleted.
    pub async fn replace_for_article(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        article_id: DbId,
        attachment_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE attachments SET article_id = NULL \
             WHERE article_id = $1 AND NOT (id = ANY($2))",
        )
        .bind(article_id)
        .bind(attachment_ids)
        .execute(&mut **tx)
        .await?;

        if !attachment_ids.is_empty() {
            sqlx::query("UPDATE attachments SET article_id = $1 WHERE id = ANY($2)")
                .bind(article_id)
                .bind(attachment_ids)
                .execute(&mut **tx)
                .await?;
        }

        Ok(())
    }
}
