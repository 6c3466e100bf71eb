//! Handlers for the `/beacons` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use furnitrack_core::beacon::validate_beacon_uuid;
use furnitrack_core::error::CoreError;
use furnitrack_core::types::DbId;
use furnitrack_db::models::beacon::{Beacon, BeaconListItem, CreateBeacon};
use furnitrack_db::models::location::LocationHistory;
use furnitrack_db::repositories::{BeaconRepo, LocationHistoryRepo};

use crate::error::{AppError, AppResult};
use crate::lifecycle::{self, BeaconCheck};
use crate::state::AppState;

/// Sightings returned by the history endpoint.
const HISTORY_LIMIT: i64 = 100;

/// GET /api/beacons
pub async fn list_beacons(State(state): State<AppState>) -> AppResult<Json<Vec<BeaconListItem>>> {
    let beacons = BeaconRepo::list(&state.pool).await?;
    Ok(Json(beacons))
}

/// POST /api/beacons
///
/// Register a beacon by UUID. Duplicates are rejected with 409.
pub async fn create_beacon(
    State(state): State<AppState>,
    Json(input): Json<CreateBeacon>,
) -> AppResult<(StatusCode, Json<Beacon>)> {
    let uuid = validate_beacon_uuid(&input.beacon_uuid)?;
    // The unique constraint still catches a concurrent insert.
    if BeaconRepo::find_by_uuid(&state.pool, uuid).await?.is_some() {
        let message = format!("Beacon {uuid} is already registered");
        return Err(CoreError::Conflict(message).into());
    }
    let beacon = BeaconRepo::create(&state.pool, uuid).await?;

    tracing::info!(beacon_id = beacon.id, beacon_uuid = %beacon.beacon_uuid, "Beacon created");
    Ok((StatusCode::CREATED, Json(beacon)))
}

/// GET /api/beacons/validate/{uuid}
///
/// Check a scanned UUID before pairing it with new furniture. Unknown
/// beacons are registered on the spot.
pub async fn validate_beacon(
    State(state): State<AppState>,
    Path(uuid): Path<String>,
) -> AppResult<Response> {
    let check = match lifecycle::check_beacon(&state.pool, &uuid).await {
        Ok(check) => check,
        Err(AppError::Core(CoreError::Validation(message))) => {
            let body = json!({ "valid": false, "message": message });
            return Ok((StatusCode::BAD_REQUEST, Json(body)).into_response());
        }
        Err(e) => return Err(e),
    };

    let body = match check {
        BeaconCheck::Registered(beacon) => json!({
            "valid": true,
            "inUse": false,
            "created": true,
            "beacon": beacon,
        }),
        BeaconCheck::Available(beacon) => json!({
            "valid": true,
            "inUse": false,
            "created": false,
            "beacon": beacon,
        }),
        BeaconCheck::InUse {
            furniture_id,
            furniture,
        } => json!({
            "valid": true,
            "inUse": true,
            "needsRetirement": true,
            "furnitureId": furniture_id,
            "furniture": furniture,
        }),
    };

    Ok(Json(body).into_response())
}

/// GET /api/beacons/{id}/history
///
/// The most recent sightings of one beacon, newest first.
pub async fn beacon_history(
    State(state): State<AppState>,
    Path(beacon_id): Path<DbId>,
) -> AppResult<Json<Vec<LocationHistory>>> {
    BeaconRepo::find_by_id(&state.pool, beacon_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Beacon",
            id: beacon_id,
        })?;

    let history = LocationHistoryRepo::list_by_beacon(&state.pool, beacon_id, HISTORY_LIMIT).await?;
    Ok(Json(history))
}
