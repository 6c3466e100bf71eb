use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The beacon is carried by an active furniture item that must be
    /// retired before the beacon can be reused.
    #[error("Beacon {beacon_uuid} is already assigned to furniture {furniture_id}")]
    BeaconInUse {
        beacon_uuid: String,
        furniture_id: DbId,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
