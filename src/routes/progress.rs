use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;

use crate::{
    error::AppError, middleware::auth::AuthUser, models::ProgressReport, routes::AppState,
    services::progress,
};

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    /// Calendar year to bucket; defaults to the current year.
    pub year: Option<i32>,
}

/// `GET /progress[?year=]` — the year-scoped analytics report.
pub async fn get_progress(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<ProgressReport>, AppError> {
    let today = Utc::now().date_naive();
    let year = query.year.unwrap_or_else(|| today.year());
    let report = progress::build_progress(&state.pool, &auth.profile_id, year, today).await?;
    Ok(Json(report))
}
