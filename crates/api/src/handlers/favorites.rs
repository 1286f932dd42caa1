//! Per-user favorite articles.

use axum::extract::{Path, State};
use axum::Json;
use kb_core::error::CoreError;
use kb_core::types::DbId;
use kb_db::repositories::{ArticleRepo, FavoriteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/favorites
///
/// Favorite article ids, newest first.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DbId>>> {
    Ok(Json(
        FavoriteRepo::list_article_ids(&state.pool, auth.user_id).await?,
    ))
}

/// POST /api/favorites/{article_id}
pub async fn add_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if !ArticleRepo::exists(&state.pool, article_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Article",
            id: article_id,
        }));
    }

    let added = FavoriteRepo::add(&state.pool, auth.user_id, article_id).await?;
    if added {
        tracing::info!(article_id, user_id = auth.user_id, "Favorite added");
    }

    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/favorites/{article_id}
pub async fn remove_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(article_id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    FavoriteRepo::remove(&state.pool, auth.user_id, article_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
