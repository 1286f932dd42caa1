//! Upload routes, with the configured body limit in place of axum's default.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes merged at the API root.
///
/// ```text
/// POST /attachments -> upload_attachment (auth, multipart)
/// POST /images      -> upload_image (auth, multipart, image/* only)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/attachments", post(uploads::upload_attachment))
        .route("/images", post(uploads::upload_image))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}
