use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;

use crate::{error::ApiError, repo, state::AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatisticsDto {
    pub travel_programs: i64,
    pub services: i64,
    pub weddings: i64,
    pub day_trips: i64,
    pub activities: i64,
    pub events: i64,
    pub users: i64,
}

// GET /api/dashboard/statistics
pub async fn get_statistics_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let stats = DashboardStatisticsDto {
        travel_programs: repo::programs::count(&state.pool).await?,
        services: repo::services::count(&state.pool).await?,
        weddings: repo::weddings::count(&state.pool).await?,
        day_trips: repo::day_trips::count(&state.pool).await?,
        activities: repo::activities::count(&state.pool).await?,
        events: repo::events::count(&state.pool).await?,
        users: repo::users::count(&state.pool).await?,
    };

    Ok(Json(stats))
}
