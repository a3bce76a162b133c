//! Session lifecycle: none → open → completed (terminal).
//!
//! Start and complete are idempotent by lookup-then-act: a repeated start
//! returns the existing open session (`is_new = false`), a repeated
//! complete returns the record unchanged (`is_duplicate = true`). The
//! lookup-then-create sequence is not wrapped in a serializable
//! transaction, so concurrent duplicate starts can race; that yields an
//! extra open session, not corrupted state.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{SeriesEntry, SessionWithCompletions, WorkoutSession};
use crate::services::schedule;

/// Rejects malformed series data before it enters the append-only log.
pub fn validate_series(series: &[SeriesEntry]) -> Result<(), AppError> {
    if series.is_empty() {
        return Err(AppError::Validation(
            "series data must contain at least one set".to_string(),
        ));
    }
    for entry in series {
        if entry.set_number < 1 {
            return Err(AppError::Validation(format!(
                "set_number must be positive, got {}",
                entry.set_number
            )));
        }
        if entry.reps < 0 {
            return Err(AppError::Validation(format!(
                "reps must not be negative, got {}",
                entry.reps
            )));
        }
        if !entry.weight.is_finite() || entry.weight < 0.0 {
            return Err(AppError::Validation(format!(
                "weight must be a non-negative number, got {}",
                entry.weight
            )));
        }
    }
    Ok(())
}

/// Starts (or resumes) a session for `date`.
///
/// With a routine id: an open session on that date already covering the
/// routine is returned unchanged, otherwise a new single-routine session
/// is created. The routine must be visible to the caller — in their gym
/// and owned by them, assigned to them or a template; anything else reads
/// as `NotFound`. Without a routine id: any open session on that date
/// wins, otherwise a session covering the whole resolved day schedule is
/// created — empty schedule means a free workout.
pub async fn start_session(
    pool: &SqlitePool,
    profile_id: &str,
    gym_id: &str,
    date: NaiveDate,
    routine_id: Option<&str>,
    name: Option<&str>,
) -> Result<(WorkoutSession, bool), AppError> {
    db::find_profile(pool, profile_id)
        .await?
        .ok_or(AppError::NotFound)?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let day = schedule::day_of_week(date);
    let open = db::find_open_sessions(pool, profile_id, &date_str).await?;

    match routine_id {
        Some(routine_id) => {
            let routine = db::get_routine(pool, routine_id)
                .await?
                .ok_or(AppError::NotFound)?;
            if routine.gym_id != gym_id {
                return Err(AppError::NotFound);
            }
            if routine.owner_id != profile_id && routine.is_template == 0 {
                let assignments =
                    db::list_assignments_for_routine(pool, routine_id, profile_id).await?;
                if assignments.is_empty() {
                    return Err(AppError::NotFound);
                }
            }

            if let Some(existing) = open.into_iter().find(|s| s.covers_routine(routine_id)) {
                return Ok((existing, false));
            }

            let session = db::create_session(
                pool,
                profile_id,
                &date_str,
                day,
                &[routine_id.to_string()],
                false,
                name,
            )
            .await?;
            tracing::debug!(session_id = %session.id, %routine_id, "started routine session");
            Ok((session, true))
        }
        None => {
            if let Some(existing) = open.into_iter().next() {
                return Ok((existing, false));
            }

            let scheduled = schedule::resolve_day(pool, profile_id, day).await?;
            let routine_ids: Vec<String> =
                scheduled.iter().map(|s| s.routine.id.clone()).collect();
            let is_free_workout = routine_ids.is_empty();

            let session = db::create_session(
                pool,
                profile_id,
                &date_str,
                day,
                &routine_ids,
                is_free_workout,
                name,
            )
            .await?;
            tracing::debug!(
                session_id = %session.id,
                routines = routine_ids.len(),
                is_free_workout,
                "started day session"
            );
            Ok((session, true))
        }
    }
}

/// Appends one exercise completion to an open session owned by the caller.
/// A completed session is terminal: this fails with `InvalidState`.
pub async fn record_exercise(
    pool: &SqlitePool,
    profile_id: &str,
    session_id: &str,
    exercise_id: &str,
    target_sets: Option<i64>,
    target_reps: Option<&str>,
    series: &[SeriesEntry],
) -> Result<SessionWithCompletions, AppError> {
    let session = owned_session(pool, profile_id, session_id).await?;
    if session.is_completed() {
        return Err(AppError::InvalidState(
            "Cannot record an exercise on a completed session".to_string(),
        ));
    }

    validate_series(series)?;
    db::find_exercise(pool, exercise_id)
        .await?
        .ok_or(AppError::NotFound)?;

    db::insert_completion(pool, session_id, exercise_id, target_sets, target_reps, series)
        .await?;

    let completions = db::list_completions(pool, session_id).await?;
    Ok(SessionWithCompletions {
        session,
        completions,
    })
}

/// Completes a session. Completing an already-completed session is the
/// tolerated double-submission path: the existing record is returned
/// unchanged with `is_duplicate = true`.
pub async fn complete_session(
    pool: &SqlitePool,
    profile_id: &str,
    session_id: &str,
    duration_minutes: Option<i64>,
    calories_burned: Option<f64>,
) -> Result<(WorkoutSession, bool), AppError> {
    let session = owned_session(pool, profile_id, session_id).await?;
    if session.is_completed() {
        return Ok((session, true));
    }

    if let Some(minutes) = duration_minutes {
        if minutes < 0 {
            return Err(AppError::Validation(
                "duration_minutes must not be negative".to_string(),
            ));
        }
    }
    if let Some(calories) = calories_burned {
        if !calories.is_finite() || calories < 0.0 {
            return Err(AppError::Validation(
                "calories_burned must be a non-negative number".to_string(),
            ));
        }
    }

    let completed = db::mark_session_completed(pool, session_id, duration_minutes, calories_burned)
        .await?
        .ok_or(AppError::NotFound)?;
    tracing::debug!(session_id = %completed.id, "completed session");
    Ok((completed, false))
}

/// A session plus its completions, for the detail view.
pub async fn session_detail(
    pool: &SqlitePool,
    profile_id: &str,
    session_id: &str,
) -> Result<SessionWithCompletions, AppError> {
    let session = owned_session(pool, profile_id, session_id).await?;
    let completions = db::list_completions(pool, session_id).await?;
    Ok(SessionWithCompletions {
        session,
        completions,
    })
}

/// Fetches a session, hiding other members' sessions behind `NotFound`.
async fn owned_session(
    pool: &SqlitePool,
    profile_id: &str,
    session_id: &str,
) -> Result<WorkoutSession, AppError> {
    let session = db::get_session(pool, session_id)
        .await?
        .ok_or(AppError::NotFound)?;
    if session.client_profile_id != profile_id {
        return Err(AppError::NotFound);
    }
    Ok(session)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(set_number: i64, reps: i64, weight: f64) -> SeriesEntry {
        SeriesEntry {
            set_number,
            reps,
            weight,
        }
    }

    #[test]
    fn empty_series_is_rejected() {
        assert!(matches!(
            validate_series(&[]),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn well_formed_series_passes() {
        let series = [entry(1, 10, 60.0), entry(2, 8, 62.5), entry(3, 0, 0.0)];
        assert!(validate_series(&series).is_ok());
    }

    #[test]
    fn malformed_entries_are_rejected() {
        assert!(validate_series(&[entry(0, 10, 60.0)]).is_err());
        assert!(validate_series(&[entry(1, -1, 60.0)]).is_err());
        assert!(validate_series(&[entry(1, 10, -5.0)]).is_err());
        assert!(validate_series(&[entry(1, 10, f64::NAN)]).is_err());
    }
}
