use axum::routing::{get, put};
use axum::Router;

use crate::handlers::departments;
use crate::state::AppState;

/// Routes mounted at `/departments`.
///
/// ```text
/// GET    /        -> list_departments
/// POST   /        -> create_department (auth)
/// PUT    /{id}    -> update_department (auth)
/// DELETE /{id}    -> delete_department (creator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(departments::list_departments).post(departments::create_department))
        .route(
            "/{id}",
            put(departments::update_department).delete(departments::delete_department),
        )
}
