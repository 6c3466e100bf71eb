//! Repository for the append-only `location_history` table.

use sqlx::{PgConnection, PgPool};
use furnitrack_core::types::DbId;

use crate::models::location::{CreateLocationHistory, LocationHistory};

const COLUMNS: &str = "id, beacon_id, detector_id, furniture_id, recorded_at, signal_strength";

pub struct LocationHistoryRepo;

impl LocationHistoryRepo {
    /// Append one sighting.
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateLocationHistory,
    ) -> Result<LocationHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO location_history
                (beacon_id, detector_id, furniture_id, recorded_at, signal_strength)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LocationHistory>(&query)
            .bind(input.beacon_id)
            .bind(input.detector_id)
            .bind(input.furniture_id)
            .bind(input.recorded_at)
            .bind(input.signal_strength)
            .fetch_one(conn)
            .await
    }

    /// Most recent sightings of a beacon.
    pub async fn list_by_beacon(
        pool: &PgPool,
        beacon_id: DbId,
        limit: i64,
    ) -> Result<Vec<LocationHistory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM location_history \
             WHERE beacon_id = $1 ORDER BY recorded_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, LocationHistory>(&query)
            .bind(beacon_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Remove the trail recorded while a beacon was on this item.
    ///
    /// Returns the number of rows removed.
    pub async fn delete_by_furniture(
        conn: &mut PgConnection,
        furniture_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM location_history WHERE furniture_id = $1")
            .bind(furniture_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }
}
