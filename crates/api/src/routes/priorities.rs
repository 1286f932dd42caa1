use axum::routing::{get, put};
use axum::Router;

use crate::handlers::priorities;
use crate::state::AppState;

/// Routes mounted at `/priorities`.
///
/// ```text
/// GET    /        -> list_priorities
/// POST   /        -> create_priority (auth)
/// PUT    /{id}    -> update_priority (auth)
/// DELETE /{id}    -> delete_priority (creator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(priorities::list_priorities).post(priorities::create_priority))
        .route(
            "/{id}",
            put(priorities::update_priority).delete(priorities::delete_priority),
        )
}
