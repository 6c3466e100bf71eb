//! Location history model and the detector batch payload.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use furnitrack_core::types::{DbId, Timestamp};

/// A row from the `location_history` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LocationHistory {
    pub id: DbId,
    pub beacon_id: DbId,
    pub detector_id: DbId,
    pub furniture_id: Option<DbId>,
    pub recorded_at: Timestamp,
    pub signal_strength: Option<i32>,
}

/// Values appended for one sighting.
#[derive(Debug, Clone)]
pub struct CreateLocationHistory {
    pub beacon_id: DbId,
    pub detector_id: DbId,
    pub furniture_id: Option<DbId>,
    pub recorded_at: Timestamp,
    pub signal_strength: Option<i32>,
}

/// Request body for `POST /api/location_history/batch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBatch {
    pub detector_uuid: String,
    pub name: Option<String>,
    pub location_type: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Defaults to the time the batch is received.
    pub recorded_at: Option<Timestamp>,
    #[serde(default)]
    pub beacons: Vec<BeaconReading>,
}

/// One beacon entry inside a [`LocationBatch`].
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeaconReading {
    pub beacon_uuid: String,
    pub signal_strength: Option<i32>,
}

/// Summary returned after ingesting a batch.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReceipt {
    pub detector_id: DbId,
    pub detector_created: bool,
    pub beacons_created: usize,
    pub recorded: usize,
    pub skipped: usize,
}
