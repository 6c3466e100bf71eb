//! Furniture photo model.

use serde::Serialize;
use sqlx::FromRow;
use furnitrack_core::types::{DbId, Timestamp};

/// A row from the `furniture_photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FurniturePhoto {
    pub id: DbId,
    pub furniture_id: DbId,
    pub photo_url: String,
    #[serde(skip_serializing)]
    pub storage_key: String,
    pub uploaded_at: Timestamp,
}

/// An object already written to storage, waiting for its database row.
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub photo_url: String,
    pub storage_key: String,
}
