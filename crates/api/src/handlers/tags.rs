//! Handlers for the `/tags` resource.
//!
//! Tags are also created implicitly when an article is saved with a name that
//! does not exist yet.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use kb_core::error::CoreError;
use kb_core::permissions::Policy;
use kb_core::types::DbId;
use kb_db::models::tag::{CreateTag, Tag};
use kb_db::repositories::TagRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_allowed;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/tags
pub async fn list_tags(State(state): State<AppState>) -> AppResult<Json<Vec<Tag>>> {
    Ok(Json(TagRepo::list(&state.pool).await?))
}

/// POST /api/tags
///
/// Create a tag, or return the existing tag with that name.
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTag>,
) -> AppResult<(StatusCode, Json<Tag>)> {
    input.validate()?;
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Name is required".into(),
        )));
    }

    let tag = TagRepo::create_or_get(&state.pool, &input.name, Some(auth.user_id)).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(tag)))
}

/// DELETE /api/tags/{id}
///
/// Creator or admin only. Removes the tag from every article.
pub async fn delete_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(tag_id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let tag = TagRepo::find_by_id(&state.pool, tag_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Tag",
            id: tag_id,
        }))?;
    ensure_allowed(
        &auth.actor(),
        Policy::OwnerOrAdmin,
        tag.created_by,
        "Only the creator or an admin can delete this tag",
    )?;

    TagRepo::delete(&state.pool, tag_id).await?;

    tracing::info!(tag_id, user_id = auth.user_id, "Tag deleted");

    Ok(Json(SuccessResponse::ok()))
}
