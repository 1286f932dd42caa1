use axum::routing::{get, post};
use axum::Router;

use crate::handlers::recently_viewed;
use crate::state::AppState;

/// Routes mounted at `/recently-viewed` (auth required).
///
/// ```text
/// GET    /                -> list_recently_viewed
/// DELETE /                -> clear_recently_viewed
/// POST   /{article_id}    -> record_view
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(recently_viewed::list_recently_viewed)
                .delete(recently_viewed::clear_recently_viewed),
        )
        .route("/{article_id}", post(recently_viewed::record_view))
}
