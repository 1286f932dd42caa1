//! Handlers for the `/priorities` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use kb_core::error::CoreError;
use kb_core::permissions::Policy;
use kb_core::types::DbId;
use kb_db::models::taxonomy::{CreatePriority, Priority, UpdatePriority};
use kb_db::repositories::PriorityRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_allowed;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Priority",
        id,
    })
}

/// GET /api/priorities
///
/// Most urgent (highest level) first.
pub async fn list_priorities(State(state): State<AppState>) -> AppResult<Json<Vec<Priority>>> {
    Ok(Json(PriorityRepo::list(&state.pool).await?))
}

/// POST /api/priorities
pub async fn create_priority(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePriority>,
) -> AppResult<(StatusCode, Json<Priority>)> {
    input.validate()?;

    let priority = PriorityRepo::create(&state.pool, &input, Some(auth.user_id)).await?;

    tracing::info!(priority_id = priority.id, user_id = auth.user_id, "Priority created");

    Ok((StatusCode::CREATED, Json(priority)))
}

/// PUT /api/priorities/{id}
pub async fn update_priority(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePriority>,
) -> AppResult<Json<Priority>> {
    input.validate()?;

    let priority = PriorityRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(priority_id = id, user_id = auth.user_id, "Priority updated");

    Ok(Json(priority))
}

/// DELETE /api/priorities/{id}
pub async fn delete_priority(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let priority = PriorityRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_allowed(
        &auth.actor(),
        Policy::OwnerOrAdmin,
        priority.created_by,
        "Only the creator or an admin can delete this priority",
    )?;

    if PriorityRepo::is_in_use(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Priority is in use by existing articles".into(),
        )));
    }

    PriorityRepo::delete(&state.pool, id).await?;

    tracing::info!(priority_id = id, user_id = auth.user_id, "Priority deleted");

    Ok(Json(SuccessResponse::ok()))
}
