//! Route definitions for the tag list.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::tags;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET    /        -> list_tags
/// POST   /        -> create_tag (auth)
/// DELETE /{id}    -> delete_tag (creator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tags::list_tags).post(tags::create_tag))
        .route("/{id}", delete(tags::delete_tag))
}
