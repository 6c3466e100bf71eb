//! Repository for the `detectors` table.

use sqlx::{PgConnection, PgPool};
use furnitrack_core::types::DbId;

use crate::models::detector::{
    Detector, DetectorItem, DetectorSummary, UpsertDetector, UpsertedDetector,
};

const COLUMNS: &str = "id, detector_uuid, name, location_type, latitude, longitude, is_active, \
                       last_reported_at, created_at";

/// Latest sighting per beacon. A beacon "is at" the detector that saw it last.
const LATEST_SIGHTING: &str = "SELECT DISTINCT ON (beacon_id) beacon_id, detector_id, recorded_at \
     FROM location_history \
     ORDER BY beacon_id, recorded_at DESC, id DESC";

pub struct DetectorRepo;

impl DetectorRepo {
    /// Active detectors with the count of active items last seen at each.
    pub async fn list_with_counts(pool: &PgPool) -> Result<Vec<DetectorSummary>, sqlx::Error> {
        let query = format!(
            "SELECT d.id, d.name, d.location_type, d.latitude, d.longitude, d.last_reported_at, \
                    COUNT(f.id) AS item_count \
             FROM detectors d \
             LEFT JOIN ({LATEST_SIGHTING}) latest ON latest.detector_id = d.id \
             LEFT JOIN beacons b ON b.id = latest.beacon_id \
             LEFT JOIN furniture f ON f.id = b.current_furniture_id AND f.is_active = true \
             WHERE d.is_active = true \
             GROUP BY d.id \
             ORDER BY d.name"
        );
        sqlx::query_as::<_, DetectorSummary>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Detector>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM detectors WHERE id = $1");
        sqlx::query_as::<_, Detector>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Active items whose beacon was last seen at this detector.
    pub async fn items_at(
        pool: &PgPool,
        detector_id: DbId,
    ) -> Result<Vec<DetectorItem>, sqlx::Error> {
        let query = format!(
            "SELECT f.id AS furniture_id, f.name, b.beacon_uuid, latest.recorded_at AS last_seen_at \
             FROM ({LATEST_SIGHTING}) latest \
             JOIN beacons b ON b.id = latest.beacon_id \
             JOIN furniture f ON f.id = b.current_furniture_id AND f.is_active = true \
             WHERE latest.detector_id = $1 \
             ORDER BY f.name"
        );
        sqlx::query_as::<_, DetectorItem>(&query)
            .bind(detector_id)
            .fetch_all(pool)
            .await
    }

    /// Create a detector on first report, otherwise refresh its position
    /// and report time. Omitted fields keep their stored values.
    pub async fn upsert(
        conn: &mut PgConnection,
        input: &UpsertDetector<'_>,
    ) -> Result<UpsertedDetector, sqlx::Error> {
        sqlx::query_as::<_, UpsertedDetector>(
            "INSERT INTO detectors \
                (detector_uuid, name, location_type, latitude, longitude, last_reported_at) \
             VALUES ($1, COALESCE($2, $1), COALESCE($3, 'warehouse'), $4, $5, $6) \
             ON CONFLICT (detector_uuid) DO UPDATE SET \
                 name = COALESCE($2, detectors.name), \
                 location_type = COALESCE($3, detectors.location_type), \
                 latitude = COALESCE(EXCLUDED.latitude, detectors.latitude), \
                 longitude = COALESCE(EXCLUDED.longitude, detectors.longitude), \
                 last_reported_at = EXCLUDED.last_reported_at \
             RETURNING id, (xmax = 0) AS created",
        )
        .bind(input.detector_uuid)
        .bind(input.name)
        .bind(input.location_type)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.reported_at)
        .fetch_one(conn)
        .await
    }
}
