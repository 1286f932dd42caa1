//! Admin-only user management handlers.

use axum::extract::{Path, State};
use axum::Json;
use kb_core::error::CoreError;
use kb_core::roles::Role;
use kb_core::types::DbId;
use kb_db::models::user::{UpdateApproval, UpdateRole, User, UserResponse};
use kb_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::SuccessResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// GET /api/users
pub async fn list_users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// PUT /api/users/{id}/role
///
/// Admins cannot demote themselves and nobody can change the root account.
pub async fn update_role(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRole>,
) -> AppResult<Json<UserResponse>> {
    let role = Role::parse(&input.role).ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Role must be 'user' or 'admin'".into(),
        ))
    })?;

    if id == admin.user_id && role != Role::Admin {
        return Err(AppError::BadRequest("You cannot demote yourself".into()));
    }

    let target = find_user(&state, id).await?;
    if target.is_root {
        return Err(AppError::Core(CoreError::Forbidden(
            "The root account cannot be modified".into(),
        )));
    }

    let user = UserRepo::update_role(&state.pool, id, role.as_str())
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(target_user_id = id, %role, user_id = admin.user_id, "User role changed");

    Ok(Json(user.into()))
}

/// PUT /api/users/{id}/approve
pub async fn update_approval(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateApproval>,
) -> AppResult<Json<UserResponse>> {
    let approved = input.approved.ok_or_else(|| {
        AppError::Core(CoreError::Validation("approved must be a boolean".into()))
    })?;

    let user = UserRepo::update_approved(&state.pool, id, approved)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(target_user_id = id, approved, user_id = admin.user_id, "User approval changed");

    Ok(Json(user.into()))
}

/// DELETE /api/users/{id}
pub async fn delete_user(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SuccessResponse>> {
    if id == admin.user_id {
        return Err(AppError::BadRequest("You cannot delete yourself".into()));
    }

    let target = find_user(&state, id).await?;
    if target.is_root {
        return Err(AppError::Core(CoreError::Forbidden(
            "The root account cannot be deleted".into(),
        )));
    }

    UserRepo::delete(&state.pool, id).await?;

    tracing::info!(target_user_id = id, user_id = admin.user_id, "User deleted");

    Ok(Json(SuccessResponse::ok()))
}
