use axum::extract::{Path, State};
use axum::Json;
use kb_core::error::CoreError;
use kb_core::types::DbId;
use kb_db::models::recently_viewed::RecentlyViewedEntry;
use kb_db::repositories::{ArticleRepo, RecentlyViewedRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/recently-viewed
pub async fn list_recently_viewed(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<RecentlyViewedEntry>>> {
    Ok(Json(RecentlyViewedRepo::list(&state.pool, auth.user_id).await?))
}

/// POST /api/recently-viewed/{article_id}
pub async fn record_view(
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

    RecentlyViewedRepo::record(&state.pool, auth.user_id, article_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /api/recently-viewed
pub async fn clear_recently_viewed(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<SuccessResponse>> {
    let removed = RecentlyViewedRepo::clear(&state.pool, auth.user_id).await?;
    tracing::debug!(user_id = auth.user_id, removed, "Recently viewed history cleared");
    Ok(Json(SuccessResponse::ok()))
}
