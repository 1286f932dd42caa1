//! Route definitions for admin user management.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`. Every handler requires the admin role.
///
/// ```text
/// GET    /                -> list_users
/// PUT    /{id}/role       -> update_role
/// PUT    /{id}/approve    -> update_approval
/// DELETE /{id}            -> delete_user
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(users::list_users))
        .route("/{id}/role", put(users::update_role))
        .route("/{id}/approve", put(users::update_approval))
        .route("/{id}", delete(users::delete_user))
}
