//! Handlers for the `/departments` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;
use kb_core::error::CoreError;
use kb_core::permissions::Policy;
use kb_core::types::DbId;
use kb_db::models::taxonomy::{Department, CreateNamedEntry, UpdateNamedEntry};
use kb_db::repositories::DepartmentRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::ensure_allowed;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Department",
        id,
    })
}

/// GET /api/departments
pub async fn list_departments(State(state): State<AppState>) -> AppResult<Json<Vec<Department>>> {
    Ok(Json(DepartmentRepo::list(&state.pool).await?))
}

/// POST /api/departments
pub async fn create_department(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateNamedEntry>,
) -> AppResult<(StatusCode, Json<Department>)> {
    input.validate()?;

    let entry = DepartmentRepo::create(&state.pool, &input, Some(auth.user_id)).await?;

    tracing::info!(department_id = entry.id, user_id = auth.user_id, "Department created");

    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/departments/{id}
pub async fn update_department(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNamedEntry>,
) -> AppResult<Json<Department>> {
    input.validate()?;

    let entry = DepartmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(department_id = id, user_id = auth.user_id, "Department updated");

    Ok(Json(entry))
}

/// DELETE /api/departments/{id}
///
/// Creator or admin only. Refused with 409 while any article references it.
pub async fn delete_department(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    let entry = DepartmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    ensure_allowed(
        &auth.actor(),
        Policy::OwnerOrAdmin,
        entry.created_by,
        "Only the creator or an admin can delete this department",
    )?;

    if DepartmentRepo::is_in_use(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::Conflict(
            "Department is in use by existing articles".into(),
        )));
    }

    DepartmentRepo::delete(&state.pool, id).await?;

    tracing::info!(department_id = id, user_id = auth.user_id, "Department deleted");

    Ok(Json(SuccessResponse::ok()))
}
