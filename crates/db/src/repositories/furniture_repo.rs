//! Repository for the `furniture` table.

use sqlx::{PgConnection, PgPool};
use furnitrack_core::types::DbId;

use crate::models::furniture::{CreateFurniture, Furniture, FurnitureListItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, category_id, description, acquisition_date, is_active, \
                       retired_date, times_deployed, last_location, current_beacon_id, \
                       previous_beacon_id, created_at, updated_at";

/// Joined select used by every list/detail read. The beacon shown is the
/// current one, falling back to the one carried at retirement.
const LIST_SELECT: &str = "SELECT f.id, f.name, f.category_id, f.description, \
        f.acquisition_date, f.is_active, f.retired_date, f.times_deployed, \
        f.last_location, f.current_beacon_id, f.previous_beacon_id, \
        f.created_at, f.updated_at, \
        c.name AS category, b.beacon_uuid \
    FROM furniture f \
    LEFT JOIN furniture_categories c ON c.id = f.category_id \
    LEFT JOIN beacons b ON b.id = COALESCE(f.current_beacon_id, f.previous_beacon_id)";

/// Provides reads and lifecycle writes for furniture.
pub struct FurnitureRepo;

impl FurnitureRepo {
    /// Active furniture, newest first.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<FurnitureListItem>, sqlx::Error> {
        let query = format!(
            "{LIST_SELECT} WHERE f.is_active = true ORDER BY f.created_at DESC, f.id DESC"
        );
        sqlx::query_as::<_, FurnitureListItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Retired furniture, most recently retired first.
    pub async fn list_retired(pool: &PgPool) -> Result<Vec<FurnitureListItem>, sqlx::Error> {
        let query = format!(
            "{LIST_SELECT} WHERE f.is_active = false \
             ORDER BY f.retired_date DESC NULLS LAST, f.updated_at DESC"
        );
        sqlx::query_as::<_, FurnitureListItem>(&query)
            .fetch_all(pool)
            .await
    }

    /// Find one item with its category and beacon joins.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<FurnitureListItem>, sqlx::Error> {
        let query = format!("{LIST_SELECT} WHERE f.id = $1");
        sqlx::query_as::<_, FurnitureListItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert an active item already pointing at its beacon.
    ///
    /// The beacon's reverse pointer must be set in the same transaction
    /// (see `BeaconRepo::assign`).
    pub async fn create(
        conn: &mut PgConnection,
        input: &CreateFurniture,
    ) -> Result<Furniture, sqlx::Error> {
        let query = format!(
            "INSERT INTO furniture (name, category_id, description, current_beacon_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Furniture>(&query)
            .bind(&input.name)
            .bind(input.category_id)
            .bind(&input.description)
            .bind(input.beacon_id)
            .fetch_one(conn)
            .await
    }

    /// Unlocked read of an item's beacon pointer.
    ///
    /// `None` when the item does not exist; `Some(None)` when it carries no
    /// beacon.
    pub async fn current_beacon_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Option<DbId>>, sqlx::Error> {
        let row: Option<(Option<DbId>,)> =
            sqlx::query_as("SELECT current_beacon_id FROM furniture WHERE id = $1")
                .bind(id)
                .fetch_optional(conn)
                .await?;
        Ok(row.map(|r| r.0))
    }

    /// Fetch an item and hold a row lock on it until the transaction ends.
    pub async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Option<Furniture>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM furniture WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Furniture>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Mark an item retired and drop its beacon pointer.
    ///
    /// The beacon is remembered in `previous_beacon_id`. The caller frees
    /// the beacon side in the same transaction.
    pub async fn retire(conn: &mut PgConnection, id: DbId) -> Result<Furniture, sqlx::Error> {
        let query = format!(
            "UPDATE furniture SET
                is_active = false,
                retired_date = CURRENT_DATE,
                previous_beacon_id = COALESCE(current_beacon_id, previous_beacon_id),
                current_beacon_id = NULL
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Furniture>(&query)
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Set the last known location, optionally counting a new deployment.
    pub async fn set_location(
        conn: &mut PgConnection,
        id: DbId,
        location: &str,
        count_deployment: bool,
    ) -> Result<Furniture, sqlx::Error> {
        let query = format!(
            "UPDATE furniture SET
                last_location = $2,
                times_deployed = times_deployed + CASE WHEN $3 THEN 1 ELSE 0 END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Furniture>(&query)
            .bind(id)
            .bind(location)
            .bind(count_deployment)
            .fetch_one(conn)
            .await
    }

    /// Delete the furniture row. Dependent rows must already be gone.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM furniture WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
