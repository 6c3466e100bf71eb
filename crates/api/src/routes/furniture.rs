//! Route definitions for the `/furniture` resource and its categories.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{categories, furniture};
use crate::state::AppState;

/// Routes mounted at `/furniture`.
///
/// ```text
/// GET    /                        -> list_furniture (auth)
/// POST   /                        -> create_furniture (auth, multipart, body limit)
/// GET    /categories              -> list_categories
/// POST   /categories              -> create_category
/// GET    /retired                 -> list_retired (auth)
/// GET    /{id}                    -> get_furniture (auth)
/// DELETE /{id}                    -> retire_furniture
/// POST   /retire/{id}             -> retire_furniture
/// DELETE /permanent-delete/{id}   -> permanently_delete (auth)
/// PUT    /{id}/location           -> update_location (auth)
/// GET    /{id}/deployments        -> list_deployments (auth)
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(furniture::list_furniture)
                .post(furniture::create_furniture)
                .layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route(
            "/categories",
            get(categories::list_categories).post(categories::create_category),
        )
        .route("/retired", get(furniture::list_retired))
        .route(
            "/{id}",
            get(furniture::get_furniture).delete(furniture::retire_furniture),
        )
        .route("/retire/{id}", post(furniture::retire_furniture))
        .route(
            "/permanent-delete/{id}",
            delete(furniture::permanently_delete),
        )
        .route("/{id}/location", put(furniture::update_location))
        .route("/{id}/deployments", get(furniture::list_deployments))
}
