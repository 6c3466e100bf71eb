//! Handler for detector batch ingestion.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use furnitrack_db::models::location::{BatchReceipt, LocationBatch};

use crate::error::AppResult;
use crate::ingestion::ingest_batch;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// POST /api/location_history/batch
///
/// Record a detector report. See [`ingest_batch`] for the semantics.
pub async fn record_batch(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(batch): Json<LocationBatch>,
) -> AppResult<(StatusCode, Json<BatchReceipt>)> {
    tracing::debug!(
        user_id = auth.user_id,
        detector_uuid = %batch.detector_uuid,
        entries = batch.beacons.len(),
        "Received detector batch"
    );
    let receipt = ingest_batch(&state.pool, &batch).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
