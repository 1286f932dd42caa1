use axum::routing::{get, put};
use axum::Router;

use crate::handlers::categories;
use crate::state::AppState;

/// Routes mounted at `/categories`.
///
/// ```text
/// GET    /        -> list_categories
/// POST   /        -> create_category (auth)
/// PUT    /{id}    -> update_category (auth)
/// DELETE /{id}    -> delete_category (creator or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::list_categories).post(categories::create_category))
        .route(
            "/{id}",
            put(categories::update_category).delete(categories::delete_category),
        )
}
