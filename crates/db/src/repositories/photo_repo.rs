//! Repository for the `furniture_photos` table.

use sqlx::{PgConnection, PgPool};
use furnitrack_core::types::DbId;

use crate::models::photo::{FurniturePhoto, NewPhoto};

const COLUMNS: &str = "id, furniture_id, photo_url, storage_key, uploaded_at";

pub struct PhotoRepo;

impl PhotoRepo {
    /// Record an uploaded photo against a furniture item.
    pub async fn create(
        conn: &mut PgConnection,
        furniture_id: DbId,
        photo: &NewPhoto,
    ) -> Result<FurniturePhoto, sqlx::Error> {
        let query = format!(
            "INSERT INTO furniture_photos (furniture_id, photo_url, storage_key)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FurniturePhoto>(&query)
            .bind(furniture_id)
            .bind(&photo.photo_url)
            .bind(&photo.storage_key)
            .fetch_one(conn)
            .await
    }

    /// Photos of one item in upload order.
    pub async fn list_by_furniture(
        pool: &PgPool,
        furniture_id: DbId,
    ) -> Result<Vec<FurniturePhoto>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM furniture_photos WHERE furniture_id = $1 ORDER BY uploaded_at, id"
        );
        sqlx::query_as::<_, FurniturePhoto>(&query)
            .bind(furniture_id)
            .fetch_all(pool)
            .await
    }

    /// Delete every photo row of an item, returning the storage keys so the
    /// objects can be removed once the transaction commits.
    pub async fn delete_by_furniture(
        conn: &mut PgConnection,
        furniture_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "DELETE FROM furniture_photos WHERE furniture_id = $1 RETURNING storage_key",
        )
        .bind(furniture_id)
        .fetch_all(conn)
        .await?;
        Ok(rows.into_iter().map(|r| r.0).collect())
    }
}
