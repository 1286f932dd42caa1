//! Handlers for the `/categories` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use kb_core::error::CoreError;
use kb_core::permissions::Policy;
use kb_core::types::DbId;
use kb_db::models::taxonomy::{Category, CreateNamedEntry, UpdateNamedEntry};
use kb_db::repositories::CategoryRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_allowed;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(CategoryRepo::list(&state.pool).await?))
}

/// POST /api/categories
pub async fn create_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNamedEntry>,
) -> AppResult<(StatusCode, Json<Category>)> {
    input.validate()?;

    let entry = CategoryRepo::create(&state.pool, &input, Some(auth.user_id)).await?;

    tracing::info!(category_id = entry.id, user_id = auth.user_id, "Category created");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNamedEntry>,
) -> AppResult<Json<Category>> {
    input.validate()?;

    let entry = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(category_id = id, user_id = auth.user_id, "Category updated");

    Ok(Json(entry))
}

/// DELETE /api/categories/{id}
///
/// Creator or admin only. Refused with 409 while any article references it.
pub async fn delete_category(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let entry = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_allowed(
        &auth.actor(),
        Policy::OwnerOrAdmin,
        entry.created_by,
        "Only the creator or an admin can delete this category",
    )?;

    if CategoryRepo::is_in_use(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Category is in use by existing articles".into(),
        )));
    }

    CategoryRepo::delete(&state.pool, id).await?;

    tracing::info!(category_id = id, user_id = auth.user_id, "Category deleted");

    Ok(Json(SuccessResponse::ok()))
}
