//! Detector batch ingestion.

use chrono::Utc;
use furnitrack_core::error::CoreError;
use furnitrack_core::sighting::collapse_sightings;
use furnitrack_db::models::detector::UpsertDetector;
use furnitrack_db::models::location::{BatchReceipt, CreateLocationHistory, LocationBatch};
use furnitrack_db::repositories::{BeaconRepo, DetectorRepo, LocationHistoryRepo};
use furnitrack_db::DbPool;

use crate::error::AppResult;

/// Record one detector report: upsert the detector, upsert every reported
/// beacon and append one history row per beacon, all in one transaction.
///
/// Entries with malformed UUIDs are skipped and counted. Retried batches are
/// not deduplicated.
pub async fn ingest_batch(pool: &DbPool, batch: &LocationBatch) -> AppResult<BatchReceipt> {
    let detector_uuid = batch.detector_uuid.trim();
    if detector_uuid.is_empty() {
        return Err(CoreError::Validation("detectorUuid is required".into()).into());
    }

    let recorded_at = batch.recorded_at.unwrap_or_else(Utc::now);
    let mut collapsed = collapse_sightings(
        batch
            .beacons
            .iter()
            .map(|b| (b.beacon_uuid.as_str(), b.signal_strength)),
    );
    // Concurrent batches touch beacon rows in the same order.
    collapsed
        .sightings
        .sort_by(|a, b| a.beacon_uuid.cmp(&b.beacon_uuid));

    let mut tx = pool.begin().await?;

    let detector = DetectorRepo::upsert(
        &mut tx,
        &UpsertDetector {
            detector_uuid,
            name: non_blank(batch.name.as_deref()),
            location_type: non_blank(batch.location_type.as_deref()),
            latitude: batch.latitude,
            longitude: batch.longitude,
            reported_at: recorded_at,
        },
    )
    .await?;

    let mut beacons_created = 0;
    for sighting in &collapsed.sightings {
        let beacon =
            BeaconRepo::upsert_sighting(&mut tx, &sighting.beacon_uuid, detector.id, recorded_at)
                .await?;
        if beacon.created {
            beacons_created += 1;
        }

        LocationHistoryRepo::create(
            &mut tx,
            &CreateLocationHistory {
                beacon_id: beacon.id,
                detector_id: detector.id,
                furniture_id: beacon.current_furniture_id,
                recorded_at,
                signal_strength: sighting.signal_strength,
            },
        )
        .await?;
    }

    tx.commit().await?;

    let receipt = BatchReceipt {
        detector_id: detector.id,
        detector_created: detector.created,
        beacons_created,
        recorded: collapsed.sightings.len(),
        skipped: collapsed.skipped,
    };

    if receipt.skipped > 0 {
        tracing::warn!(
            detector_uuid,
            skipped = receipt.skipped,
            "Skipped malformed beacon UUIDs in batch"
        );
    }
    tracing::info!(
        detector_id = receipt.detector_id,
        recorded = receipt.recorded,
        beacons_created = receipt.beacons_created,
        "Ingested detector batch"
    );

    Ok(receipt)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
