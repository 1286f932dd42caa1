use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// The pool is created by the binary and closed by it after shutdown.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kb_db::DbPool,
    /// Server configuration (JWT settings, upload directory, limits).
    pub config: Arc<ServerConfig>,
}
