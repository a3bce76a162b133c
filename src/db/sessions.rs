//! Workout-session and exercise-completion queries.
//!
//! Lifecycle columns: `completed = 0` is an open session, `completed = 1`
//! is terminal. The open/completed transition is a single UPDATE guarded
//! by `completed = 0` so a concurrent duplicate complete never overwrites
//! the first writer's duration/calories.

use crate::error::AppError;
use crate::models::{ExerciseCompletion, SeriesEntry, WorkoutSession};
use sqlx::types::Json;
use sqlx::SqlitePool;

const SESSION_COLUMNS: &str = "id, client_profile_id, session_date, day_of_week, routine_ids, \
     name, is_free_workout, completed, duration_minutes, calories_burned, \
     started_at, completed_at";

const COMPLETION_COLUMNS: &str =
    "id, session_id, exercise_id, target_sets, target_reps, series_data, completed_at";

#[allow(clippy::too_many_arguments)]
pub async fn create_session(
    pool: &SqlitePool,
    client_profile_id: &str,
    session_date: &str,
    day_of_week: i64,
    routine_ids: &[String],
    is_free_workout: bool,
    name: Option<&str>,
) -> Result<WorkoutSession, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO workout_sessions
            (id, client_profile_id, session_date, day_of_week, routine_ids,
             is_free_workout, name)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(client_profile_id)
    .bind(session_date)
    .bind(day_of_week)
    .bind(Json(routine_ids.to_vec()))
    .bind(is_free_workout as i64)
    .bind(name)
    .execute(pool)
    .await?;

    get_session(pool, &id).await?.ok_or(AppError::Internal(
        "Failed to retrieve created session".to_string(),
    ))
}

pub async fn get_session(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<WorkoutSession>, AppError> {
    let session = sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(session)
}

/// Open sessions for one member on one calendar date, oldest first.
pub async fn find_open_sessions(
    pool: &SqlitePool,
    client_profile_id: &str,
    session_date: &str,
) -> Result<Vec<WorkoutSession>, AppError> {
    let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions \
         WHERE client_profile_id = ? AND session_date = ? AND completed = 0 \
         ORDER BY started_at"
    ))
    .bind(client_profile_id)
    .bind(session_date)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Completed sessions for one member on one calendar date.
pub async fn find_completed_sessions_on(
    pool: &SqlitePool,
    client_profile_id: &str,
    session_date: &str,
) -> Result<Vec<WorkoutSession>, AppError> {
    let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions \
         WHERE client_profile_id = ? AND session_date = ? AND completed = 1 \
         ORDER BY started_at"
    ))
    .bind(client_profile_id)
    .bind(session_date)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Full completed history, newest first.
pub async fn list_completed_sessions(
    pool: &SqlitePool,
    client_profile_id: &str,
) -> Result<Vec<WorkoutSession>, AppError> {
    let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions \
         WHERE client_profile_id = ? AND completed = 1 \
         ORDER BY session_date DESC, started_at DESC"
    ))
    .bind(client_profile_id)
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Completed sessions within one calendar year, oldest first (bucket order).
pub async fn list_completed_sessions_for_year(
    pool: &SqlitePool,
    client_profile_id: &str,
    year: i32,
) -> Result<Vec<WorkoutSession>, AppError> {
    let sessions = sqlx::query_as::<_, WorkoutSession>(&format!(
        "SELECT {SESSION_COLUMNS} FROM workout_sessions \
         WHERE client_profile_id = ? AND completed = 1 \
           AND substr(session_date, 1, 4) = ? \
         ORDER BY session_date, started_at"
    ))
    .bind(client_profile_id)
    .bind(format!("{year:04}"))
    .fetch_all(pool)
    .await?;

    Ok(sessions)
}

/// Marks a session completed, persisting optional duration/calories.
/// The `completed = 0` guard makes this a no-op on an already-completed
/// session; callers detect that case beforehand and return the existing
/// record instead.
pub async fn mark_session_completed(
    pool: &SqlitePool,
    id: &str,
    duration_minutes: Option<i64>,
    calories_burned: Option<f64>,
) -> Result<Option<WorkoutSession>, AppError> {
    sqlx::query(
        r#"
        UPDATE workout_sessions
        SET completed = 1,
            completed_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now'),
            duration_minutes = ?,
            calories_burned = ?
        WHERE id = ? AND completed = 0
        "#,
    )
    .bind(duration_minutes)
    .bind(calories_burned)
    .bind(id)
    .execute(pool)
    .await?;

    get_session(pool, id).await
}

pub async fn insert_completion(
    pool: &SqlitePool,
    session_id: &str,
    exercise_id: &str,
    target_sets: Option<i64>,
    target_reps: Option<&str>,
    series: &[SeriesEntry],
) -> Result<ExerciseCompletion, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO exercise_completions
            (id, session_id, exercise_id, target_sets, target_reps, series_data)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(session_id)
    .bind(exercise_id)
    .bind(target_sets)
    .bind(target_reps)
    .bind(Json(series.to_vec()))
    .execute(pool)
    .await?;

    let completion = sqlx::query_as::<_, ExerciseCompletion>(&format!(
        "SELECT {COMPLETION_COLUMNS} FROM exercise_completions WHERE id = ?"
    ))
    .bind(&id)
    .fetch_optional(pool)
    .await?;

    completion.ok_or(AppError::Internal(
        "Failed to retrieve created completion".to_string(),
    ))
}

/// Completions of one session in insertion order (UUIDv7 ids are
/// time-ordered, which breaks same-millisecond timestamp ties).
pub async fn list_completions(
    pool: &SqlitePool,
    session_id: &str,
) -> Result<Vec<ExerciseCompletion>, AppError> {
    let completions = sqlx::query_as::<_, ExerciseCompletion>(&format!(
        "SELECT {COMPLETION_COLUMNS} FROM exercise_completions \
         WHERE session_id = ? ORDER BY completed_at, id"
    ))
    .bind(session_id)
    .fetch_all(pool)
    .await?;

    Ok(completions)
}

/// All completions across a member's completed sessions in one year.
pub async fn list_completions_for_year(
    pool: &SqlitePool,
    client_profile_id: &str,
    year: i32,
) -> Result<Vec<ExerciseCompletion>, AppError> {
    let completions = sqlx::query_as::<_, ExerciseCompletion>(&format!(
        "SELECT c.{} FROM exercise_completions c \
         JOIN workout_sessions s ON s.id = c.session_id \
         WHERE s.client_profile_id = ? AND s.completed = 1 \
           AND substr(s.session_date, 1, 4) = ? \
         ORDER BY c.completed_at, c.id",
        COMPLETION_COLUMNS.replace(", ", ", c.")
    ))
    .bind(client_profile_id)
    .bind(format!("{year:04}"))
    .fetch_all(pool)
    .await?;

    Ok(completions)
}

/// Count of completions across all of a member's completed sessions.
pub async fn count_completions(
    pool: &SqlitePool,
    client_profile_id: &str,
) -> Result<i64, AppError> {
    let (count,): (i64,) = sqlx::query_as(
        r#"
        SELECT COUNT(*)
        FROM exercise_completions c
        JOIN workout_sessions s ON s.id = c.session_id
        WHERE s.client_profile_id = ? AND s.completed = 1
        "#,
    )
    .bind(client_profile_id)
    .fetch_one(pool)
    .await?;

    Ok(count)
}
