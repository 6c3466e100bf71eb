//! Handlers for furniture categories.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use furnitrack_core::error::CoreError;
use furnitrack_db::models::category::{CreateCategory, FurnitureCategory};
use furnitrack_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/furniture/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<FurnitureCategory>>> {
    Ok(Json(CategoryRepo::list(&state.pool).await?))
}

/// POST /api/furniture/categories
pub async fn create_category(
    State(state): State<AppState>,
    Json(mut input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<FurnitureCategory>)> {
    input.name = input.name.trim().to_string();
    input.validate()?;

    // The unique constraint still catches a concurrent insert.
    if CategoryRepo::find_by_name(&state.pool, &input.name).await?.is_some() {
        let message = format!("Category '{}' already exists", input.name);
        return Err(CoreError::Conflict(message).into());
    }

    let category = CategoryRepo::create(&state.pool, &input.name).await?;
    tracing::info!(category_id = category.id, name = %category.name, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}
