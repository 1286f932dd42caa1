//! Integration tests for article CRUD, tag replacement, and statistics.

use sqlx::PgPool;
use kb_db::models::article::{ArticleFilter, CreateArticle, UpdateArticle};
use kb_db::models::attachment::CreateAttachment;
use kb_db::models::taxonomy::CreateNamedEntry;
use kb_db::repositories::{ArticleRepo, AttachmentRepo, CategoryRepo, TagRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_article(title: &str) -> CreateArticle {
    CreateArticle {
        title: title.to_string(),
        summary: None,
        content: None,
        category_id: None,
        department_id: None,
        priority_id: None,
        author: Some("author@example.com".to_string()),
        author_id: None,
        tags: Vec::new(),
        attachment_ids: Vec::new(),
    }
}

fn update_from(title: &str) -> UpdateArticle {
    UpdateArticle {
        title: title.to_string(),
        summary: None,
        content: None,
        category_id: None,
        department_id: None,
        priority_id: None,
        author: None,
        tags: None,
        attachment_ids: None,
    }
}

fn new_attachment(name: &str) -> CreateAttachment {
    CreateAttachment {
        article_id: None,
        file_name: name.to_string(),
        mime_type: Some("application/pdf".to_string()),
        size: Some(1024),
        url: format!("/uploads/1-{name}"),
    }
}

fn tags(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_joins_taxonomy_names(pool: PgPool) {
    let category = CategoryRepo::create(
        &pool,
        &CreateNamedEntry {
            name: "Networking".to_string(),
            description: None,
        },
        None,
    )
    .await
    .unwrap();

    let mut input = new_article("Wi-Fi troubleshooting");
    input.category_id = Some(category.id);
    input.tags = tags(&["wifi", " network ", "wifi", ""]);

    let article = ArticleRepo::create(&pool, &input).await.unwrap();
    assert_eq!(article.row.category_name.as_deref(), Some("Networking"));
    assert_eq!(article.row.views, 0);
    assert_eq!(article.tags, tags(&["network", "wifi"]));
    assert!(article.attachments.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_missing_article_returns_none(pool: PgPool) {
    assert!(ArticleRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_taxonomy(pool: PgPool) {
    let category = CategoryRepo::list(&pool).await.unwrap().remove(0);

    let mut tagged = new_article("In category");
    tagged.category_id = Some(category.id);
    let tagged = ArticleRepo::create(&pool, &tagged).await.unwrap();
    ArticleRepo::create(&pool, &new_article("Elsewhere")).await.unwrap();

    let all = ArticleRepo::list(&pool, &ArticleFilter::default()).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = ArticleRepo::list(
        &pool,
        &ArticleFilter {
            category_id: Some(category.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].row.id, tagged.row.id);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_without_tags_keeps_them(pool: PgPool) {
    let mut input = new_article("Original");
    input.tags = tags(&["keep"]);
    let created = ArticleRepo::create(&pool, &input).await.unwrap();

    let updated = ArticleRepo::update(&pool, created.row.id, &update_from("Renamed"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.row.title, "Renamed");
    assert_eq!(updated.tags, tags(&["keep"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_with_empty_tags_clears_them(pool: PgPool) {
    let mut input = new_article("Original");
    input.tags = tags(&["a", "b"]);
    let created = ArticleRepo::create(&pool, &input).await.unwrap();

    let mut update = update_from("Original");
    update.tags = Some(Vec::new());
    let updated = ArticleRepo::update(&pool, created.row.id, &update, None)
        .await
        .unwrap()
        .unwrap();
    assert!(updated.tags.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_replaces_tag_set(pool: PgPool) {
    let mut input = new_article("Original");
    input.tags = tags(&["old", "shared"]);
    let created = ArticleRepo::create(&pool, &input).await.unwrap();

    let mut update = update_from("Original");
    update.tags = Some(tags(&["shared", "new"]));
    let updated = ArticleRepo::update(&pool, created.row.id, &update, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.tags, tags(&["new", "shared"]));

    // The unused tag itself survives; only the association is gone.
    let all: Vec<String> = TagRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert!(all.contains(&"old".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_bumps_updated_at_monotonically(pool: PgPool) {
    let created = ArticleRepo::create(&pool, &new_article("Clock")).await.unwrap();
    let before = created.row.updated_at;

    let first = ArticleRepo::update(&pool, created.row.id, &update_from("Clock 2"), None)
        .await
        .unwrap()
        .unwrap();
    assert!(first.row.updated_at >= before);

    // Push the stored timestamp into the future; an update must not move it back.
    sqlx::query("UPDATE articles SET updated_at = NOW() + INTERVAL '1 hour' WHERE id = $1")
        .bind(created.row.id)
        .execute(&pool)
        .await
        .unwrap();
    let future = ArticleRepo::find_row(&pool, created.row.id)
        .await
        .unwrap()
        .unwrap()
        .updated_at;

    let second = ArticleRepo::update(&pool, created.row.id, &update_from("Clock 3"), None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.row.updated_at, future);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_missing_article_returns_none(pool: PgPool) {
    let result = ArticleRepo::update(&pool, 424_242, &update_from("Ghost"), None)
        .await
        .unwrap();
    assert!(result.is_none());
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachments_are_linked_and_detached(pool: PgPool) {
    let first = AttachmentRepo::create(&pool, &new_attachment("a.pdf")).await.unwrap();
    let second = AttachmentRepo::create(&pool, &new_attachment("b.pdf")).await.unwrap();

    let mut input = new_article("With files");
    input.attachment_ids = vec![first.id, second.id];
    let created = ArticleRepo::create(&pool, &input).await.unwrap();
    assert_eq!(created.attachments.len(), 2);

    let mut update = update_from("With files");
    update.attachment_ids = Some(vec![second.id]);
    let updated = ArticleRepo::update(&pool, created.row.id, &update, None)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.attachments.len(), 1);
    assert_eq!(updated.attachments[0].id, second.id);

    let detached = AttachmentRepo::find_by_id(&pool, first.id).await.unwrap().unwrap();
    assert_eq!(detached.article_id, None);
}

// ---------------------------------------------------------------------------
// Delete / views / stats
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn tag_names_load_for_many_articles_at_once(pool: PgPool) {
    let mut first = new_article("First");
    first.tags = tags(&["zeta", "alpha"]);
    let first = ArticleRepo::create(&pool, &first).await.unwrap();
    let untagged = ArticleRepo::create(&pool, &new_article("Untagged")).await.unwrap();

    let by_article =
        TagRepo::names_for_articles(&pool, &[first.row.id, untagged.row.id, 999_999])
            .await
            .unwrap();

    assert_eq!(by_article[&first.row.id], tags(&["alpha", "zeta"]));
    assert!(by_article[&untagged.row.id].is_empty());
    assert!(by_article[&999_999].is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_removes_article_and_tag_links(pool: PgPool) {
    let mut input = new_article("Doomed");
    input.tags = tags(&["temp"]);
    let created = ArticleRepo::create(&pool, &input).await.unwrap();

    assert!(ArticleRepo::delete(&pool, created.row.id).await.unwrap());
    assert!(!ArticleRepo::delete(&pool, created.row.id).await.unwrap());

    let links: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM article_tags WHERE article_id = $1")
        .bind(created.row.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(links, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn increment_views_leaves_updated_at(pool: PgPool) {
    let created = ArticleRepo::create(&pool, &new_article("Popular")).await.unwrap();

    ArticleRepo::increment_views(&pool, created.row.id).await.unwrap();
    ArticleRepo::increment_views(&pool, created.row.id).await.unwrap();

    let row = ArticleRepo::find_row(&pool, created.row.id).await.unwrap().unwrap();
    assert_eq!(row.views, 2);
    assert_eq!(row.updated_at, created.row.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn stats_counts_articles_and_views(pool: PgPool) {
    let category = CategoryRepo::list(&pool).await.unwrap().remove(0);

    let mut input = new_article("Counted");
    input.category_id = Some(category.id);
    let created = ArticleRepo::create(&pool, &input).await.unwrap();
    ArticleRepo::create(&pool, &new_article("Also counted")).await.unwrap();
    ArticleRepo::increment_views(&pool, created.row.id).await.unwrap();

    let stats = ArticleRepo::stats(&pool).await.unwrap();
    assert_eq!(stats.total_articles, 2);
    assert_eq!(stats.total_views, 1);
    assert_eq!(stats.recent_articles.len(), 2);

    let entry = stats
        .by_category
        .iter()
        .find(|c| c.name == category.name)
        .unwrap();
    assert_eq!(entry.count, 1);
    // Seeded categories without articles still appear.
    assert_eq!(stats.by_category.len(), 6);
}
