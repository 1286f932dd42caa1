//! Repository for the `articles` table, including search.
//!
//! Rows are always read joined with their taxonomy display fields. Tags and
//! attachments are loaded for the whole result set in one query each.

use sqlx::PgPool;
use kb_core::search::{containment_pattern, preview, SearchableText};
use kb_core::types::DbId;

use crate::models::article::{
    Article, ArticleFilter, ArticleRow, ArticleStats, CreateArticle, NamedCount, RecentArticle,
    SearchResult, UpdateArticle,
};
use crate::repositories::{AttachmentRepo, TagRepo};

/// Joined projection shared by every article read.
const SELECT_JOINED: &str = "\
    SELECT a.id, a.title, a.summary, a.content, \
           a.category_id, a.department_id, a.priority_id, \
           a.author, a.author_id, a.views, a.created_at, a.updated_at, \
           c.name AS category_name, d.name AS department_name, \
           p.name AS priority_name, p.color AS priority_color, p.level AS priority_level \
    FROM articles a \
    LEFT JOIN categories c ON c.id = a.category_id \
    LEFT JOIN departments d ON d.id = a.department_id \
    LEFT JOIN priorities p ON p.id = a.priority_id";

/// Number of articles reported in the stats "recently updated" list.
const RECENT_ARTICLES_LIMIT: i64 = 5;

/// Provides CRUD, search, and statistics for articles.
pub struct ArticleRepo;

impl ArticleRepo {
    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// List articles matching `filter`, most recently updated first.
    pub async fn list(pool: &PgPool, filter: &ArticleFilter) -> Result<Vec<Article>, sqlx::Error> {
        let query = format!(
            "{SELECT_JOINED} \
             WHERE ($1::BIGINT IS NULL OR a.category_id = $1) \
               AND ($2::BIGINT IS NULL OR a.department_id = $2) \
               AND ($3::BIGINT IS NULL OR a.priority_id = $3) \
             ORDER BY a.updated_at DESC, a.id DESC"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(filter.category_id)
            .bind(filter.department_id)
            .bind(filter.priority_id)
            .fetch_all(pool)
            .await?;

        Self::enrich(pool, rows).await
    }

    /// Find the joined row for one article, without tags or attachments.
    pub async fn find_row(pool: &PgPool, id: DbId) -> Result<Option<ArticleRow>, sqlx::Error> {
        let query = format!("{SELECT_JOINED} WHERE a.id = $1");
        sqlx::query_as::<_, ArticleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find one article with its tags and attachments.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Article>, sqlx::Error> {
        match Self::find_row(pool, id).await? {
            Some(row) => Ok(Self::enrich(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Whether an article with this id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM articles WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Owner of an article, for authorization. `None` if the article is missing.
    pub async fn find_author_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        sqlx::query_scalar("SELECT author_id FROM articles WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Case-insensitive containment search over title, summary, and content.
    ///
    /// Results are ordered by `updated_at` descending and each carries its
    /// snippet, matched field, and tags. An empty term returns no results
    /// without querying.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<SearchResult>, sqlx::Error> {
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!(
            "{SELECT_JOINED} \
             WHERE a.title ILIKE $1 OR a.summary ILIKE $1 OR a.content ILIKE $1 \
             ORDER BY a.updated_at DESC, a.id DESC"
        );
        let rows = sqlx::query_as::<_, ArticleRow>(&query)
            .bind(containment_pattern(term))
            .fetch_all(pool)
            .await?;

        let ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut tags = TagRepo::names_for_articles(pool, &ids).await?;

        let results = rows
            .into_iter()
            .map(|row| {
                let fields = SearchableText {
                    title: &row.title,
                    summary: row.summary.as_deref(),
                    content: row.content.as_deref(),
                };
                let preview = preview(&fields, term);
                SearchResult {
                    tags: tags.remove(&row.id).unwrap_or_default(),
                    snippet: preview.snippet,
                    match_field: preview.match_field,
                    row,
                }
            })
            .collect::<Vec<_>>();

        tracing::debug!(term, count = results.len(), "Article search");
        Ok(results)
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert an article with its tags and attachment links in one transaction.
    pub async fn create(pool: &PgPool, input: &CreateArticle) -> Result<Article, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO articles \
                (title, summary, content, category_id, department_id, priority_id, \
                 author, author_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.content)
        .bind(input.category_id)
        .bind(input.department_id)
        .bind(input.priority_id)
        .bind(&input.author)
        .bind(input.author_id)
        .fetch_one(&mut *tx)
        .await?;

        if !input.tags.is_empty() {
            TagRepo::replace_article_tags(&mut tx, id, &input.tags, input.author_id).await?;
        }
        if !input.attachment_ids.is_empty() {
            AttachmentRepo::replace_for_article(&mut tx, id, &input.attachment_ids).await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, id).await?.ok_or(sqlx::Error::RowNotFound)
    }

    /// Replace an article's scalar fields and, when given, its tags and
    /// attachments.
    ///
    /// `updated_at` is bumped and never moves backwards. Returns `None` if the
    /// article does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArticle,
        actor_id: Option<DbId>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE articles SET \
                title = $2, \
                summary = $3, \
                content = $4, \
                category_id = $5, \
                department_id = $6, \
                priority_id = $7, \
                author = $8, \
                updated_at = GREATEST(NOW(), updated_at) \
             WHERE id = $1 \
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.summary)
        .bind(&input.content)
        .bind(input.category_id)
        .bind(input.department_id)
        .bind(input.priority_id)
        .bind(&input.author)
        .fetch_optional(&mut *tx)
        .await?;

        if updated.is_none() {
            return Ok(None);
        }

        if let Some(tags) = &input.tags {
            TagRepo::replace_article_tags(&mut tx, id, tags, actor_id).await?;
        }
        if let Some(attachment_ids) = &input.attachment_ids {
            AttachmentRepo::replace_for_article(&mut tx, id, attachment_ids).await?;
        }

        tx.commit().await?;

        Self::find_by_id(pool, id).await
    }

    /// Delete an article. Tag links, favorites, and history rows cascade;
    /// attachments are detached.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Add one to the view counter. Does not touch `updated_at`.
    pub async fn increment_views(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE articles SET views = views + 1 WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Statistics
    // -----------------------------------------------------------------------

    /// Totals, per-taxonomy counts, and the most recently updated articles.
    pub async fn stats(pool: &PgPool) -> Result<ArticleStats, sqlx::Error> {
        let (total_articles, total_views): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(views), 0)::BIGINT FROM articles",
        )
        .fetch_one(pool)
        .await?;

        let by_category = sqlx::query_as::<_, NamedCount>(
            "SELECT c.name, COUNT(a.id) AS count \
             FROM categories c \
             LEFT JOIN articles a ON a.category_id = c.id \
             GROUP BY c.id, c.name \
             ORDER BY c.name",
        )
        .fetch_all(pool)
        .await?;

        let by_department = sqlx::query_as::<_, NamedCount>(
            "SELECT d.name, COUNT(a.id) AS count \
             FROM departments d \
             LEFT JOIN articles a ON a.department_id = d.id \
             GROUP BY d.id, d.name \
             ORDER BY d.name",
        )
        .fetch_all(pool)
        .await?;

        let recent_articles = sqlx::query_as::<_, RecentArticle>(
            "SELECT id, title, updated_at FROM articles \
             ORDER BY updated_at DESC, id DESC \
             LIMIT $1",
        )
        .bind(RECENT_ARTICLES_LIMIT)
        .fetch_all(pool)
        .await?;

        Ok(ArticleStats {
            total_articles,
            total_views,
            by_category,
            by_department,
            recent_articles,
        })
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Attach tags and attachments to a batch of rows, keeping row order.
    async fn enrich(pool: &PgPool, rows: Vec<ArticleRow>) -> Result<Vec<Article>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|row| row.id).collect();
        let mut tags = TagRepo::names_for_articles(pool, &ids).await?;
        let mut attachments = AttachmentRepo::list_for_articles(pool, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| Article {
                tags: tags.remove(&row.id).unwrap_or_default(),
                attachments: attachments.remove(&row.id).unwrap_or_default(),
                row,
            })
            .collect())
    }
}
