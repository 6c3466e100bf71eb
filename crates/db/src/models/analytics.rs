//! Read models for the weekly analytics endpoint.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

/// Sighting totals for one calendar day (UTC).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailySightings {
    pub day: NaiveDate,
    pub sightings: i64,
    pub beacons: i64,
}

/// Response body for `GET /api/analytics/weekly`.
#[derive(Debug, Clone, Serialize)]
pub struct WeeklyAnalytics {
    pub days: Vec<DailySightings>,
    pub registered: i64,
    pub retired: i64,
}
