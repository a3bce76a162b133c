//! Week and today schedule views.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppError, middleware::auth::AuthUser, models::TodaySchedule, routes::AppState,
    services::schedule,
};

#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    /// Caller's local calendar date; defaults to the server's UTC date.
    pub date: Option<NaiveDate>,
}

/// `GET /schedule/week` — all seven days, each an ordered list of
/// `{routine, is_own}` entries. Empty days are rest days.
pub async fn week_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let days = schedule::resolve_week(&state.pool, &auth.profile_id).await?;
    Ok(Json(json!({ "days": days })))
}

/// `GET /schedule/today[?date=YYYY-MM-DD]` — today's routines plus the
/// routine ids already completed on that date.
pub async fn today_schedule(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<TodayQuery>,
) -> Result<Json<TodaySchedule>, AppError> {
    let date = query.date.unwrap_or_else(|| Utc::now().date_naive());
    let today = schedule::today_schedule(&state.pool, &auth.profile_id, date).await?;
    Ok(Json(today))
}
