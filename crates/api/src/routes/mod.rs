pub mod articles;
pub mod auth;
pub mod categories;
pub mod departments;
pub mod favorites;
pub mod health;
pub mod priorities;
pub mod recently_viewed;
pub mod tags;
pub mod uploads;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/me                             current user (auth)
///
/// /articles                            list (public), create (auth)
/// /articles/search?q=                  containment search with snippets (public)
/// /articles/stats                      dashboard counters (public)
/// /articles/{id}                       get (public), update, delete
///
/// /categories                          list, create
/// /categories/{id}                     update, delete
/// /departments                         list, create
/// /departments/{id}                    update, delete
/// /priorities                          list, create
/// /priorities/{id}                     update, delete
///
/// /tags                                list, create
/// /tags/{id}                           delete
///
/// /attachments                         upload attachment (multipart)
/// /images                              upload inline image (multipart)
///
/// /users                               list (admin only)
/// /users/{id}/role                     change role (PUT)
/// /users/{id}/approve                  approve or revoke (PUT)
/// /users/{id}                          delete
///
/// /favorites                           list ids
/// /favorites/{article_id}              add, remove
///
/// /recently-viewed                     list, clear
/// /recently-viewed/{article_id}        record view (POST)
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/articles", articles::router())
        .nest("/categories", categories::router())
        .nest("/departments", departments::router())
        .nest("/priorities", priorities::router())
        .nest("/tags", tags::router())
        .nest("/users", users::router())
        .nest("/favorites", favorites::router())
        .nest("/recently-viewed", recently_viewed::router())
        // Multipart uploads with a raised body limit.
        .merge(uploads::router(max_upload_bytes))
}
