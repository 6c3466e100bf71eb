//! Aggregate queries behind `GET /api/analytics/weekly`.

use sqlx::PgPool;

use crate::models::analytics::DailySightings;

pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Sightings and distinct beacons per UTC day for the last `days` days
    /// (today inclusive). Days without sightings are zero-filled.
    pub async fn daily_sightings(
        pool: &PgPool,
        days: i32,
    ) -> Result<Vec<DailySightings>, sqlx::Error> {
        sqlx::query_as::<_, DailySightings>(
            "SELECT d.day, \
                    COUNT(lh.id) AS sightings, \
                    COUNT(DISTINCT lh.beacon_id) AS beacons \
             FROM ( \
                 SELECT generate_series( \
                     ((NOW() AT TIME ZONE 'UTC')::date - ($1::int - 1))::timestamp, \
                     (NOW() AT TIME ZONE 'UTC')::date::timestamp, \
                     INTERVAL '1 day' \
                 )::date AS day \
             ) d \
             LEFT JOIN location_history lh \
                 ON (lh.recorded_at AT TIME ZONE 'UTC')::date = d.day \
             GROUP BY d.day \
             ORDER BY d.day",
        )
        .bind(days)
        .fetch_all(pool)
        .await
    }

    /// Furniture acquired within the last `days` days.
    pub async fn count_registered(pool: &PgPool, days: i32) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM furniture \
             WHERE acquisition_date > CURRENT_DATE - $1::int",
        )
        .bind(days)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Furniture retired within the last `days` days.
    pub async fn count_retired(pool: &PgPool, days: i32) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM furniture \
             WHERE retired_date IS NOT NULL AND retired_date > CURRENT_DATE - $1::int",
        )
        .bind(days)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
