//! Furniture entity model, joined read models, and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use furnitrack_core::types::{DbId, Timestamp};

use crate::models::photo::FurniturePhoto;

/// A row from the `furniture` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Furniture {
    pub id: DbId,
    pub name: String,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    pub acquisition_date: NaiveDate,
    pub is_active: bool,
    pub retired_date: Option<NaiveDate>,
    pub times_deployed: i32,
    pub last_location: Option<String>,
    pub current_beacon_id: Option<DbId>,
    pub previous_beacon_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Furniture joined with its category name and beacon UUID.
///
/// For active rows `beacon_uuid` is the current beacon; for retired rows it
/// is the beacon carried at retirement.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FurnitureListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub furniture: Furniture,
    pub category: Option<String>,
    pub beacon_uuid: Option<String>,
}

/// Single furniture item with its photos.
#[derive(Debug, Clone, Serialize)]
pub struct FurnitureDetail {
    #[serde(flatten)]
    pub item: FurnitureListItem,
    pub photos: Vec<FurniturePhoto>,
}

/// Values inserted when new furniture is registered.
#[derive(Debug, Clone)]
pub struct CreateFurniture {
    pub name: String,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    pub beacon_id: DbId,
}

/// Request body for `PUT /api/furniture/{id}/location`.
#[derive(Debug, Deserialize)]
pub struct UpdateLocation {
    pub location: String,
}

/// A row from the `furniture_deployments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FurnitureDeployment {
    pub id: DbId,
    pub furniture_id: DbId,
    pub location: String,
    pub deployed_at: Timestamp,
}
