//! Handlers for the `/detectors` resource.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use furnitrack_core::error::CoreError;
use furnitrack_core::types::DbId;
use furnitrack_db::models::detector::{Detector, DetectorItem, DetectorSummary};
use furnitrack_db::repositories::DetectorRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// A detector together with the items last seen there.
#[derive(Debug, Serialize)]
pub struct DetectorDetail {
    #[serde(flatten)]
    pub detector: Detector,
    pub items: Vec<DetectorItem>,
}

/// GET /api/detectors
///
/// Active detectors with the number of active items last seen at each.
pub async fn list_detectors(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<DetectorSummary>>> {
    Ok(Json(DetectorRepo::list_with_counts(&state.pool).await?))
}

/// GET /api/detectors/{id}
pub async fn get_detector(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DetectorDetail>> {
    let detector = DetectorRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Detector",
            id,
        })?;
    let items = DetectorRepo::items_at(&state.pool, id).await?;

    Ok(Json(DetectorDetail { detector, items }))
}
