//! Detector entity model and read models.

use serde::Serialize;
use sqlx::FromRow;
use furnitrack_core::types::{DbId, Timestamp};

/// A row from the `detectors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detector {
    pub id: DbId,
    pub detector_uuid: String,
    pub name: String,
    pub location_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub last_reported_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Detector with the number of active items last seen there.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorSummary {
    pub id: DbId,
    pub name: String,
    pub location_type: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub last_reported_at: Option<Timestamp>,
    pub item_count: i64,
}

/// An active item whose beacon was last seen at a given detector.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectorItem {
    pub furniture_id: DbId,
    pub name: String,
    pub beacon_uuid: String,
    pub last_seen_at: Timestamp,
}

/// Values written when a detector reports in.
#[derive(Debug, Clone)]
pub struct UpsertDetector<'a> {
    pub detector_uuid: &'a str,
    pub name: Option<&'a str>,
    pub location_type: Option<&'a str>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub reported_at: Timestamp,
}

/// Result of [`UpsertDetector`].
#[derive(Debug, Clone, FromRow)]
pub struct UpsertedDetector {
    pub id: DbId,
    pub created: bool,
}
