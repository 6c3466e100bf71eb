use std::sync::Arc;

use crate::config::ServerConfig;
use crate::storage::PhotoStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: furnitrack_db::DbPool,
    /// Server configuration (JWT settings, bootstrap credential, limits).
    pub config: Arc<ServerConfig>,
    /// Object store holding furniture photos.
    pub photo_store: Arc<dyn PhotoStore>,
}
