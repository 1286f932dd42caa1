//! HTTP-level tests for attachment and image uploads.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, get, post_json_auth, post_multipart_auth};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_attachment_stores_file_and_serves_it(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "writer@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app.clone(),
        "/api/attachments",
        "guide.pdf",
        "application/pdf",
        b"%PDF-1.4 test",
        &[],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["file_name"], "guide.pdf");
    assert_eq!(json["mime_type"], "application/pdf");
    assert_eq!(json["size"], 13);
    assert!(json["article_id"].is_null());
    let url = json["url"].as_str().unwrap();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".pdf"));

    let response = get(app, url).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"%PDF-1.4 test");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachment_with_article_id_is_listed_on_article(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "writer@example.com").await;
    let app = common::build_test_app(pool);
    let article = body_json(
        post_json_auth(app.clone(), "/api/articles", json!({ "title": "Docs" }), &token).await,
    )
    .await;
    let article_id = article["id"].as_i64().unwrap().to_string();

    let response = post_multipart_auth(
        app.clone(),
        "/api/attachments",
        "notes.txt",
        "text/plain",
        b"hello",
        &[("articleId", article_id.as_str())],
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let fetched = body_json(get(app, &format!("/api/articles/{article_id}")).await).await;
    let attachments = fetched["attachments"].as_array().unwrap();
    assert_eq!(attachments.len(), 1);
    assert_eq!(attachments[0]["file_name"], "notes.txt");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachment_for_missing_article_returns_404(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "writer@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/attachments",
        "notes.txt",
        "text/plain",
        b"hello",
        &[("articleId", "999999")],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_image_returns_camel_case_metadata(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "writer@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/images",
        "diagram.png",
        "image/png",
        &[0x89, b'P', b'N', b'G'],
        &[],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["fileName"], "diagram.png");
    assert_eq!(json["mimeType"], "image/png");
    assert_eq!(json["size"], 4);
    assert!(json["url"].as_str().unwrap().ends_with(".png"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_image_rejects_non_images(pool: PgPool) {
    let (_user, token) = common::user_with_token(&pool, "writer@example.com").await;
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/images",
        "script.sh",
        "text/x-shellscript",
        b"echo hi",
        &[],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn upload_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_multipart_auth(
        app,
        "/api/attachments",
        "notes.txt",
        "text/plain",
        b"hello",
        &[],
        "invalid-token",
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn failed_attachment_insert_removes_stored_file() {
    let config = common::test_config();
    let upload_dir = config.upload_dir.clone();
    let app = common::build_test_app_with_config(common::unreachable_pool(), config);
    let token = kb_api::auth::jwt::generate_access_token(
        1,
        "writer@example.com",
        "user",
        &common::test_jwt_config(),
    )
    .unwrap();

    let response = post_multipart_auth(
        app,
        "/api/attachments",
        "guide.pdf",
        "application/pdf",
        b"%PDF-1.4 test",
        &[],
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let leftover = std::fs::read_dir(&upload_dir)
        .map(|entries| entries.count())
        .unwrap_or(0);
    assert_eq!(leftover, 0);
}
