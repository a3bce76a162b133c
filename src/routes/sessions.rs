//! Session lifecycle handlers: start, record, complete, detail, history.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::AppError,
    middleware::auth::AuthUser,
    models::{
        CompleteSessionRequest, RecordExerciseRequest, SessionWithCompletions,
        StartSessionRequest,
    },
    routes::AppState,
    services::{progress, sessions},
};

/// `POST /sessions/start` — idempotent: a matching open session on the
/// date is returned with `is_new = false` instead of creating a second one.
pub async fn start_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<StartSessionRequest>,
) -> Result<Json<Value>, AppError> {
    let date = req.date.unwrap_or_else(|| Utc::now().date_naive());
    let (session, is_new) = sessions::start_session(
        &state.pool,
        &auth.profile_id,
        &auth.gym_id,
        date,
        req.routine_id.as_deref(),
        req.name.as_deref(),
    )
    .await?;

    Ok(Json(json!({ "session": session, "is_new": is_new })))
}

/// `POST /sessions/{id}/exercises` — appends one exercise completion.
/// Fails with `invalid_state` once the session is completed.
pub async fn record_exercise(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<RecordExerciseRequest>,
) -> Result<Json<SessionWithCompletions>, AppError> {
    let detail = sessions::record_exercise(
        &state.pool,
        &auth.profile_id,
        &id,
        &req.exercise_id,
        req.target_sets,
        req.target_reps.as_deref(),
        &req.series,
    )
    .await?;

    Ok(Json(detail))
}

/// `POST /sessions/{id}/complete` — idempotent: completing twice returns
/// the unchanged record with `is_duplicate = true`.
pub async fn complete_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<CompleteSessionRequest>,
) -> Result<Json<Value>, AppError> {
    let (session, is_duplicate) = sessions::complete_session(
        &state.pool,
        &auth.profile_id,
        &id,
        req.duration_minutes,
        req.calories_burned,
    )
    .await?;

    Ok(Json(json!({ "session": session, "is_duplicate": is_duplicate })))
}

/// `GET /sessions/{id}` — session detail with completions and their
/// derived intensity scores.
pub async fn get_session(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let detail = sessions::session_detail(&state.pool, &auth.profile_id, &id).await?;
    let catalog = progress::load_catalog(&state.pool, &detail.completions).await?;
    let intensities = progress::session_intensities(&detail.completions, &catalog);

    Ok(Json(json!({
        "session": detail.session,
        "completions": detail.completions,
        "intensities": intensities
    })))
}

/// `GET /history` — full completed-session list plus overview stats.
pub async fn get_history(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let (sessions, stats) =
        progress::build_history(&state.pool, &auth.profile_id, today).await?;
    Ok(Json(json!({ "sessions": sessions, "stats": stats })))
}
