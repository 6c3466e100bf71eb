//! Furniture category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use furnitrack_core::types::{DbId, Timestamp};

/// A row from the `furniture_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FurnitureCategory {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /api/furniture/categories`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 100, message = "Category name must be 1-100 characters"))]
    pub name: String,
}
