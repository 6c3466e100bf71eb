//! Repository for the `beacons` table.

use sqlx::{PgConnection, PgPool};
use furnitrack_core::types::{DbId, Timestamp};

use crate::models::beacon::{Beacon, BeaconListItem, SightedBeacon};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, beacon_uuid, is_active, current_furniture_id, last_detector_id, \
                       last_seen_at, created_at";

/// Provides beacon registration, lookup and pointer maintenance.
pub struct BeaconRepo;

impl BeaconRepo {
    /// List all beacons with the name of the furniture carrying them.
    pub async fn list(pool: &PgPool) -> Result<Vec<BeaconListItem>, sqlx::Error> {
        sqlx::query_as::<_, BeaconListItem>(
            "SELECT b.id, b.beacon_uuid, b.is_active, b.current_furniture_id, \
                    b.last_detector_id, b.last_seen_at, b.created_at, \
                    f.name AS furniture_name \
             FROM beacons b \
             LEFT JOIN furniture f ON f.id = b.current_furniture_id \
             ORDER BY b.beacon_uuid",
        )
        .fetch_all(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Beacon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beacons WHERE id = $1");
        sqlx::query_as::<_, Beacon>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_uuid(pool: &PgPool, uuid: &str) -> Result<Option<Beacon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beacons WHERE beacon_uuid = $1");
        sqlx::query_as::<_, Beacon>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await
    }

    /// Register a beacon. Duplicates violate `uq_beacons_beacon_uuid`.
    pub async fn create(pool: &PgPool, uuid: &str) -> Result<Beacon, sqlx::Error> {
        let query = format!("INSERT INTO beacons (beacon_uuid) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Beacon>(&query)
            .bind(uuid)
            .fetch_one(pool)
            .await
    }

    /// Return the beacon with `uuid`, registering it first if unseen.
    ///
    /// The boolean is `true` when this call created the row. Safe under
    /// concurrent calls for the same UUID: the loser of the insert race
    /// falls through to the lookup.
    pub async fn find_or_create(pool: &PgPool, uuid: &str) -> Result<(Beacon, bool), sqlx::Error> {
        let query = format!(
            "INSERT INTO beacons (beacon_uuid) VALUES ($1) \
             ON CONFLICT (beacon_uuid) DO NOTHING \
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Beacon>(&query)
            .bind(uuid)
            .fetch_optional(pool)
            .await?;

        match inserted {
            Some(beacon) => Ok((beacon, true)),
            None => {
                let beacon = Self::find_by_uuid(pool, uuid)
                    .await?
                    .ok_or(sqlx::Error::RowNotFound)?;
                Ok((beacon, false))
            }
        }
    }

    /// Fetch a beacon and hold a row lock on it until the transaction ends.
    pub async fn lock_by_uuid(
        conn: &mut PgConnection,
        uuid: &str,
    ) -> Result<Option<Beacon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beacons WHERE beacon_uuid = $1 FOR UPDATE");
        sqlx::query_as::<_, Beacon>(&query)
            .bind(uuid)
            .fetch_optional(conn)
            .await
    }

    /// Lock a beacon by id. See [`BeaconRepo::lock_by_uuid`].
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Beacon>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM beacons WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Beacon>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Point a beacon at the furniture now carrying it.
    pub async fn assign(
        conn: &mut PgConnection,
        beacon_id: DbId,
        furniture_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE beacons SET current_furniture_id = $2 WHERE id = $1")
            .bind(beacon_id)
            .bind(furniture_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Free whichever beacon points at `furniture_id`.
    ///
    /// Returns the id of the released beacon, if any.
    pub async fn release_from_furniture(
        conn: &mut PgConnection,
        furniture_id: DbId,
    ) -> Result<Option<DbId>, sqlx::Error> {
        let row: Option<(DbId,)> = sqlx::query_as(
            "UPDATE beacons SET current_furniture_id = NULL \
             WHERE current_furniture_id = $1 \
             RETURNING id",
        )
        .bind(furniture_id)
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|r| r.0))
    }

    /// Register-or-refresh a beacon from a detector sighting.
    ///
    /// `xmax = 0` is true only for freshly inserted tuples, which tells us
    /// whether the upsert created the row.
    pub async fn upsert_sighting(
        conn: &mut PgConnection,
        uuid: &str,
        detector_id: DbId,
        seen_at: Timestamp,
    ) -> Result<SightedBeacon, sqlx::Error> {
        sqlx::query_as::<_, SightedBeacon>(
            "INSERT INTO beacons (beacon_uuid, last_detector_id, last_seen_at) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (beacon_uuid) DO UPDATE SET \
                 last_detector_id = EXCLUDED.last_detector_id, \
                 last_seen_at = GREATEST(beacons.last_seen_at, EXCLUDED.last_seen_at) \
             RETURNING id, current_furniture_id, (xmax = 0) AS created",
        )
        .bind(uuid)
        .bind(detector_id)
        .bind(seen_at)
        .fetch_one(conn)
        .await
    }
}
