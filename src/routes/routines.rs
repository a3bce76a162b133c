//! Routine CRUD and day-assignment handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    db,
    error::AppError,
    middleware::auth::AuthUser,
    models::{
        CreateAssignmentRequest, CreateRoutineRequest, Routine, RoutineWithExercises,
        UpdateRoutineRequest, ASSIGNED_PROFESSIONAL, ASSIGNED_SELF, OWNER_PROFESSIONAL,
    },
    routes::AppState,
    services::schedule,
};

#[derive(Debug, Deserialize)]
pub struct ListRoutinesQuery {
    /// When true, list the gym's reusable templates instead of the
    /// caller's own routines.
    pub templates: Option<bool>,
}

fn validate_scale(value: i64, field: &str) -> Result<(), AppError> {
    if (1..=5).contains(&value) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "{field} must be between 1 and 5, got {value}"
        )))
    }
}

fn validate_routine_payload(
    name: Option<&str>,
    level: Option<i64>,
    intensity: Option<i64>,
) -> Result<(), AppError> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
    }
    if let Some(level) = level {
        validate_scale(level, "level")?;
    }
    if let Some(intensity) = intensity {
        validate_scale(intensity, "intensity")?;
    }
    Ok(())
}

/// Only the author may edit or delete; a mismatch reads as absence.
fn editable(routine: &Routine, auth: &AuthUser) -> bool {
    routine.owner_id == auth.profile_id && routine.owner_kind == auth.role
}

/// `GET /routines[?templates=true]`
pub async fn list_routines(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListRoutinesQuery>,
) -> Result<Json<Value>, AppError> {
    let routines = if query.templates.unwrap_or(false) {
        db::list_templates_for_gym(&state.pool, &auth.gym_id).await?
    } else {
        db::list_routines_for_owner(&state.pool, &auth.profile_id).await?
    };
    Ok(Json(json!({ "routines": routines })))
}

/// `POST /routines` — the caller (member or professional) becomes the owner.
pub async fn create_routine(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateRoutineRequest>,
) -> Result<Json<RoutineWithExercises>, AppError> {
    validate_routine_payload(Some(&req.name), req.level, req.intensity)?;
    for exercise in &req.exercises {
        if exercise.target_sets < 1 {
            return Err(AppError::Validation(
                "target_sets must be at least 1".to_string(),
            ));
        }
        db::find_exercise(&state.pool, &exercise.exercise_id)
            .await?
            .ok_or(AppError::NotFound)?;
    }

    let routine =
        db::create_routine(&state.pool, &auth.profile_id, &auth.role, &auth.gym_id, &req).await?;
    let exercises = db::list_routine_exercises(&state.pool, &routine.id).await?;
    Ok(Json(RoutineWithExercises { routine, exercises }))
}

/// `GET /routines/{id}`
pub async fn get_routine(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<RoutineWithExercises>, AppError> {
    let routine = db::get_routine(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    // Visible within the caller's gym only.
    if routine.gym_id != auth.gym_id {
        return Err(AppError::NotFound);
    }
    let exercises = db::list_routine_exercises(&state.pool, &id).await?;
    Ok(Json(RoutineWithExercises { routine, exercises }))
}

/// `PATCH /routines/{id}` — owner only.
pub async fn update_routine(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateRoutineRequest>,
) -> Result<Json<RoutineWithExercises>, AppError> {
    validate_routine_payload(req.name.as_deref(), req.level, req.intensity)?;

    let routine = db::get_routine(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !editable(&routine, &auth) {
        return Err(AppError::NotFound);
    }

    let routine = db::update_routine(&state.pool, &id, &req)
        .await?
        .ok_or(AppError::NotFound)?;
    let exercises = db::list_routine_exercises(&state.pool, &id).await?;
    Ok(Json(RoutineWithExercises { routine, exercises }))
}

/// `DELETE /routines/{id}` — owner only. Cascades to day assignments;
/// historical sessions keep their snapshot ids untouched.
pub async fn delete_routine(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let routine = db::get_routine(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if !editable(&routine, &auth) {
        return Err(AppError::NotFound);
    }

    db::delete_routine(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /routines/{id}/assignments` — the caller's day links for a routine.
pub async fn list_routine_assignments(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let _ = db::get_routine(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    let assignments =
        db::list_assignments_for_routine(&state.pool, &id, &auth.profile_id).await?;
    Ok(Json(json!({ "assignments": assignments })))
}

/// `POST /routines/{id}/assignments` — links the routine to a day of the
/// week. A duplicate (profile, routine, day) insert returns the existing
/// row as success.
pub async fn create_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<CreateAssignmentRequest>,
) -> Result<Json<Value>, AppError> {
    schedule::validate_day_of_week(req.day_of_week)?;

    let routine = db::get_routine(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if routine.gym_id != auth.gym_id {
        return Err(AppError::NotFound);
    }

    let (target_profile, assigned_by) = match &req.client_profile_id {
        // A professional assigning their own routine to a client.
        Some(client_profile_id) => {
            if auth.role != OWNER_PROFESSIONAL || !editable(&routine, &auth) {
                return Err(AppError::Validation(
                    "Only the authoring professional can assign a routine to a client"
                        .to_string(),
                ));
            }
            db::find_profile(&state.pool, client_profile_id)
                .await?
                .ok_or(AppError::NotFound)?;
            (client_profile_id.as_str(), ASSIGNED_PROFESSIONAL)
        }
        // Self-assignment: own routines and gym templates only.
        None => {
            if !routine.is_owned_by(&auth.profile_id) && routine.is_template == 0 {
                return Err(AppError::NotFound);
            }
            (auth.profile_id.as_str(), ASSIGNED_SELF)
        }
    };

    let assignment = db::create_assignment(
        &state.pool,
        target_profile,
        &id,
        req.day_of_week,
        assigned_by,
        req.sort_order.unwrap_or(0),
    )
    .await?;
    Ok(Json(json!({ "assignment": assignment })))
}

/// `DELETE /assignments/{id}` — the assigned member unlinks a day.
pub async fn delete_assignment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let assignment = db::find_assignment(&state.pool, &id)
        .await?
        .ok_or(AppError::NotFound)?;
    if assignment.client_profile_id != auth.profile_id {
        return Err(AppError::NotFound);
    }

    db::delete_assignment(&state.pool, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
