pub mod analytics;
pub mod auth;
pub mod beacons;
pub mod detectors;
pub mod furniture;
pub mod health;
pub mod location;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                              login (public)
/// /auth/profile                            current user (requires auth)
///
/// /beacons                                 list, create
/// /beacons/validate/{uuid}                 validate / auto-register
/// /beacons/{id}/history                    recent sightings
///
/// /furniture                               list, create (requires auth, body limit)
/// /furniture/categories                    list, create
/// /furniture/retired                       retired items (requires auth)
/// /furniture/{id}                          get (requires auth), retire (DELETE)
/// /furniture/retire/{id}                   retire (POST)
/// /furniture/permanent-delete/{id}         hard delete (requires auth)
/// /furniture/{id}/location                 update location (requires auth)
/// /furniture/{id}/deployments              deployment log (requires auth)
///
/// /detectors                               list with item counts
/// /detectors/{id}                          detector with items
///
/// /location_history/batch                  detector report (requires auth)
///
/// /analytics/weekly                        7-day activity summary
/// ```
///
/// `max_upload_bytes` caps only the multipart registration body.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/beacons", beacons::router())
        .nest("/furniture", furniture::router(max_upload_bytes))
        .nest("/detectors", detectors::router())
        .nest("/location_history", location::router())
        .nest("/analytics", analytics::router())
}
