//! Beacon entity model and API payloads.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use furnitrack_core::beacon::BeaconState;
use furnitrack_core::types::{DbId, Timestamp};

/// A row from the `beacons` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Beacon {
    pub id: DbId,
    pub beacon_uuid: String,
    pub is_active: bool,
    pub current_furniture_id: Option<DbId>,
    pub last_detector_id: Option<DbId>,
    pub last_seen_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl Beacon {
    /// Assignment state derived from `current_furniture_id`.
    pub fn state(&self) -> BeaconState {
        BeaconState::from_pointer(self.current_furniture_id)
    }
}

/// Beacon joined with the name of the furniture currently carrying it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BeaconListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub beacon: Beacon,
    pub furniture_name: Option<String>,
}

/// Request body for `POST /api/beacons`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBeacon {
    pub beacon_uuid: String,
}

/// Result of upserting a beacon from a detector sighting.
#[derive(Debug, Clone, FromRow)]
pub struct SightedBeacon {
    pub id: DbId,
    pub current_furniture_id: Option<DbId>,
    /// `true` when the row was inserted rather than refreshed.
    pub created: bool,
}
