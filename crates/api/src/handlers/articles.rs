//! Handlers for the `/articles` resource, including search and statistics.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;
use kb_core::error::CoreError;
use kb_core::permissions::Policy;
use kb_core::types::DbId;
use kb_db::models::article::{
    Article, ArticleFilter, ArticleStats, CreateArticle, CreateArticleRequest, SearchResult,
    UpdateArticle, UpdateArticleRequest,
};
use kb_db::repositories::ArticleRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_allowed;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Query parameters for `GET /api/articles/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Article",
        id,
    })
}

/// GET /api/articles
pub async fn list_articles(
    State(state): State<AppState>,
    Query(filter): Query<ArticleFilter>,
) -> AppResult<Json<Vec<Article>>> {
    let articles = ArticleRepo::list(&state.pool, &filter).await?;
    Ok(Json(articles))
}

/// GET /api/articles/search?q=
///
/// Public. A missing or empty `q` yields `[]`.
pub async fn search_articles(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let results = ArticleRepo::search(&state.pool, &params.q).await?;
    Ok(Json(results))
}

/// GET /api/articles/stats
pub async fn article_stats(State(state): State<AppState>) -> AppResult<Json<ArticleStats>> {
    Ok(Json(ArticleRepo::stats(&state.pool).await?))
}

/// GET /api/articles/{id}
///
/// Counts a view after the article has been loaded. The response carries the
/// count as it was before this view.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Article>> {
    let article = ArticleRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    ArticleRepo::increment_views(&state.pool, id).await?;

    Ok(Json(article))
}

/// POST /api/articles
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateArticleRequest>,
) -> AppResult<(StatusCode, Json<Article>)> {
    input.validate()?;

    let create = CreateArticle::from_request(input, auth.email.clone(), auth.user_id);
    let article = ArticleRepo::create(&state.pool, &create).await?;

    tracing::info!(article_id = article.row.id, user_id = auth.user_id, "Article created");

    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /api/articles/{id}
///
/// Owner or admin. Absent `tags` / `attachmentIds` leave those sets as they are.
pub async fn update_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArticleRequest>,
) -> AppResult<Json<Article>> {
    input.validate()?;

    let existing = ArticleRepo::find_row(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_allowed(
        &auth.actor(),
        Policy::OwnerOrAdmin,
        existing.author_id,
        "Only the author or an admin can edit this article",
    )?;

    let update = UpdateArticle::from_request(input, existing.author);
    let article = ArticleRepo::update(&state.pool, id, &update, Some(auth.user_id))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(article_id = id, user_id = auth.user_id, "Article updated");

    Ok(Json(article))
}

/// DELETE /api/articles/{id}
pub async fn delete_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let owner = ArticleRepo::find_author_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_allowed(
        &auth.actor(),
        Policy::OwnerOrAdmin,
        owner,
        "Only the author or an admin can delete this article",
    )?;

    if !ArticleRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(article_id = id, user_id = auth.user_id, "Article deleted");

    Ok(Json(SuccessResponse::ok()))
}
