//! Route definitions for `/location_history`.

use axum::routing::post;
use axum::Router;

use crate::handlers::location;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/batch", post(location::record_batch))
}
