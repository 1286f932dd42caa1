//! Route definitions for the `/articles` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::articles;
use crate::state::AppState;

/// Routes mounted at `/articles`.
///
/// `/search` and `/stats` are registered as static segments so they never
/// match the `{id}` capture.
///
/// ```text
/// GET    /          -> list_articles
/// POST   /          -> create_article (auth)
/// GET    /search    -> search_articles
/// GET    /stats     -> article_stats
/// GET    /{id}      -> get_article
/// PUT    /{id}      -> update_article (owner or admin)
/// DELETE /{id}      -> delete_article (owner or admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route("/search", get(articles::search_articles))
        .route("/stats", get(articles::article_stats))
        .route(
            "/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
}
