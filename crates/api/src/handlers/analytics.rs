//! Handler for the weekly activity summary.

use axum::extract::State;
use axum::Json;
use furnitrack_db::models::analytics::WeeklyAnalytics;
use furnitrack_db::repositories::AnalyticsRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Window covered by the weekly summary, today inclusive.
const WINDOW_DAYS: i32 = 7;

/// GET /api/analytics/weekly
pub async fn weekly(State(state): State<AppState>) -> AppResult<Json<WeeklyAnalytics>> {
    let days = AnalyticsRepo::daily_sightings(&state.pool, WINDOW_DAYS).await?;
    let registered = AnalyticsRepo::count_registered(&state.pool, WINDOW_DAYS).await?;
    let retired = AnalyticsRepo::count_retired(&state.pool, WINDOW_DAYS).await?;

    Ok(Json(WeeklyAnalytics {
        days,
        registered,
        retired,
    }))
}
