//! Route definitions for the `/detectors` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::detectors;
use crate::state::AppState;

/// ```text
/// GET /       -> list_detectors
/// GET /{id}   -> get_detector
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(detectors::list_detectors))
        .route("/{id}", get(detectors::get_detector))
}
