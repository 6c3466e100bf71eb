//! Route definitions for the `/beacons` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::beacons;
use crate::state::AppState;

/// Routes mounted at `/beacons`.
///
/// ```text
/// GET  /                 -> list_beacons
/// POST /                 -> create_beacon
/// GET  /validate/{uuid}  -> validate_beacon
/// GET  /{id}/history     -> beacon_history
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(beacons::list_beacons).post(beacons::create_beacon))
        .route("/validate/{uuid}", get(beacons::validate_beacon))
        .route("/{id}/history", get(beacons::beacon_history))
}
