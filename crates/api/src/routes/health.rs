//! `/health`: liveness plus reachability of the database and photo bucket.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"` when every dependency answered, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub storage_healthy: bool,
}

/// GET /health
///
/// Always 200. A failed dependency only flips its flag and the status.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (db, storage) = tokio::join!(
        furnitrack_db::health_check(&state.pool),
        state.photo_store.check(),
    );

    if let Err(e) = &db {
        tracing::warn!(error = %e, "Health check: database unreachable");
    }
    if let Err(e) = &storage {
        tracing::warn!(error = %e, "Health check: photo store unreachable");
    }

    let db_healthy = db.is_ok();
    let storage_healthy = storage.is_ok();
    Json(HealthResponse {
        status: if db_healthy && storage_healthy {
            "ok"
        } else {
            "degraded"
        },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        storage_healthy,
    })
}

/// Mounted at the root, outside `/api` and its body limit.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
