//! Repository for the `furniture_categories` table.

use sqlx::PgPool;
use furnitrack_core::types::DbId;

use crate::models::category::FurnitureCategory;

const COLUMNS: &str = "id, name, created_at";

/// Provides list/create operations for furniture categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories alphabetically.
    pub async fn list(pool: &PgPool) -> Result<Vec<FurnitureCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM furniture_categories ORDER BY name");
        sqlx::query_as::<_, FurnitureCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Insert a category. Duplicate names violate `uq_furniture_categories_name`.
    pub async fn create(pool: &PgPool, name: &str) -> Result<FurnitureCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO furniture_categories (name) VALUES ($1) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FurnitureCategory>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_name(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<FurnitureCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM furniture_categories WHERE name = $1");
        sqlx::query_as::<_, FurnitureCategory>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FurnitureCategory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM furniture_categories WHERE id = $1");
        sqlx::query_as::<_, FurnitureCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
