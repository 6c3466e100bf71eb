//! Beacon identifier rules and assignment states.
//!
//! A beacon moves through `Unregistered -> Available -> Assigned -> Available`.
//! The database stores the state implicitly through `current_furniture_id`;
//! [`BeaconState`] gives it a name so handlers can branch on it.

use crate::error::CoreError;
use crate::types::DbId;

/// Substring every genuine beacon UUID carries.
pub const BEACON_UUID_MARKER: &str = "PNCLDGS";

/// Longest UUID accepted, matching the `beacons.beacon_uuid` column width.
pub const MAX_BEACON_UUID_LEN: usize = 64;

/// Normalize and check a beacon UUID, returning the trimmed form.
///
/// The marker comparison is case-sensitive: hardware prints it in upper case
/// and lower-case look-alikes come from hand-typed mistakes.
pub fn validate_beacon_uuid(raw: &str) -> Result<&str, CoreError> {
    let uuid = raw.trim();
    if uuid.is_empty() {
        return Err(CoreError::Validation("Beacon UUID is required".into()));
    }
    if uuid.len() > MAX_BEACON_UUID_LEN {
        return Err(CoreError::Validation(format!(
            "Beacon UUID must be at most {MAX_BEACON_UUID_LEN} characters"
        )));
    }
    if !uuid.contains(BEACON_UUID_MARKER) {
        return Err(CoreError::Validation(format!(
            "Invalid beacon UUID format: expected the {BEACON_UUID_MARKER} marker"
        )));
    }
    Ok(uuid)
}

/// Assignment state of a registered beacon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeaconState {
    /// Registered and free to be paired with new furniture.
    Available,
    /// Carried by the given active furniture item.
    Assigned { furniture_id: DbId },
}

impl BeaconState {
    /// Derive the state from the beacon's `current_furniture_id` column.
    pub fn from_pointer(current_furniture_id: Option<DbId>) -> Self {
        match current_furniture_id {
            Some(furniture_id) => Self::Assigned { furniture_id },
            None => Self::Available,
        }
    }

    /// Fail with [`CoreError::BeaconInUse`] unless the beacon can be assigned.
    pub fn ensure_assignable(self, beacon_uuid: &str) -> Result<(), CoreError> {
        match self {
            Self::Available => Ok(()),
            Self::Assigned { furniture_id } => Err(CoreError::BeaconInUse {
                beacon_uuid: beacon_uuid.to_string(),
                furniture_id,
            }),
        }
    }
}
