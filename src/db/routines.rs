//! Routine and routine-exercise queries.
//!
//! Deleting a routine cascades to its day assignments (FK) but never
//! touches workout sessions: sessions hold routine ids as a snapshot,
//! not foreign keys.

use crate::error::AppError;
use crate::models::{CreateRoutineRequest, Routine, RoutineExercise, UpdateRoutineRequest};
use sqlx::SqlitePool;

const ROUTINE_COLUMNS: &str = "id, owner_id, owner_kind, gym_id, name, category, level, \
     intensity, estimated_minutes, is_template, created_at, updated_at";

/// Bind value for the dynamically built UPDATE, keeping numeric columns
/// bound as integers rather than text.
enum Bind {
    Text(String),
    Int(i64),
}

pub async fn create_routine(
    pool: &SqlitePool,
    owner_id: &str,
    owner_kind: &str,
    gym_id: &str,
    req: &CreateRoutineRequest,
) -> Result<Routine, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    let mut tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO routines
            (id, owner_id, owner_kind, gym_id, name, category, level,
             intensity, estimated_minutes, is_template)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(owner_id)
    .bind(owner_kind)
    .bind(gym_id)
    .bind(&req.name)
    .bind(&req.category)
    .bind(req.level.unwrap_or(1))
    .bind(req.intensity.unwrap_or(1))
    .bind(req.estimated_minutes)
    .bind(req.is_template.unwrap_or(false) as i64)
    .execute(&mut *tx)
    .await?;

    for (index, exercise) in req.exercises.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO routine_exercises
                (id, routine_id, exercise_id, target_sets, target_reps,
                 rest_seconds, order_index)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(uuid::Uuid::now_v7().to_string())
        .bind(&id)
        .bind(&exercise.exercise_id)
        .bind(exercise.target_sets)
        .bind(&exercise.target_reps)
        .bind(exercise.rest_seconds.unwrap_or(60))
        .bind(index as i64)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    get_routine(pool, &id).await?.ok_or(AppError::Internal(
        "Failed to retrieve created routine".to_string(),
    ))
}

pub async fn get_routine(pool: &SqlitePool, id: &str) -> Result<Option<Routine>, AppError> {
    let routine = sqlx::query_as::<_, Routine>(&format!(
        "SELECT {ROUTINE_COLUMNS} FROM routines WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(routine)
}

pub async fn list_routine_exercises(
    pool: &SqlitePool,
    routine_id: &str,
) -> Result<Vec<RoutineExercise>, AppError> {
    let exercises = sqlx::query_as::<_, RoutineExercise>(
        r#"
        SELECT id, routine_id, exercise_id, target_sets, target_reps,
               rest_seconds, order_index
        FROM routine_exercises
        WHERE routine_id = ?
        ORDER BY order_index
        "#,
    )
    .bind(routine_id)
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}

/// Routines authored by one owner (member or professional), newest first.
pub async fn list_routines_for_owner(
    pool: &SqlitePool,
    owner_id: &str,
) -> Result<Vec<Routine>, AppError> {
    let routines = sqlx::query_as::<_, Routine>(&format!(
        "SELECT {ROUTINE_COLUMNS} FROM routines WHERE owner_id = ? ORDER BY created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;

    Ok(routines)
}

/// Reusable templates visible across one gym.
pub async fn list_templates_for_gym(
    pool: &SqlitePool,
    gym_id: &str,
) -> Result<Vec<Routine>, AppError> {
    let routines = sqlx::query_as::<_, Routine>(&format!(
        "SELECT {ROUTINE_COLUMNS} FROM routines \
         WHERE gym_id = ? AND is_template = 1 ORDER BY created_at DESC"
    ))
    .bind(gym_id)
    .fetch_all(pool)
    .await?;

    Ok(routines)
}

/// Partial update. Fields absent from the request are left unchanged; a
/// present `exercises` list replaces the whole ordered list.
pub async fn update_routine(
    pool: &SqlitePool,
    id: &str,
    req: &UpdateRoutineRequest,
) -> Result<Option<Routine>, AppError> {
    if get_routine(pool, id).await?.is_none() {
        return Ok(None);
    }

    let mut query =
        String::from("UPDATE routines SET updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')");
    let mut bindings: Vec<Bind> = Vec::new();

    if let Some(name) = &req.name {
        query.push_str(", name = ?");
        bindings.push(Bind::Text(name.clone()));
    }
    if let Some(category) = &req.category {
        query.push_str(", category = ?");
        bindings.push(Bind::Text(category.clone()));
    }
    if let Some(level) = req.level {
        query.push_str(", level = ?");
        bindings.push(Bind::Int(level));
    }
    if let Some(intensity) = req.intensity {
        query.push_str(", intensity = ?");
        bindings.push(Bind::Int(intensity));
    }
    if let Some(estimated_minutes) = req.estimated_minutes {
        query.push_str(", estimated_minutes = ?");
        bindings.push(Bind::Int(estimated_minutes));
    }
    if let Some(is_template) = req.is_template {
        query.push_str(", is_template = ?");
        bindings.push(Bind::Int(is_template as i64));
    }

    query.push_str(" WHERE id = ?");
    bindings.push(Bind::Text(id.to_string()));

    let mut query_builder = sqlx::query(&query);
    for binding in bindings {
        query_builder = match binding {
            Bind::Text(value) => query_builder.bind(value),
            Bind::Int(value) => query_builder.bind(value),
        };
    }
    query_builder.execute(pool).await?;

    if let Some(exercises) = &req.exercises {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM routine_exercises WHERE routine_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        for (index, exercise) in exercises.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO routine_exercises
                    (id, routine_id, exercise_id, target_sets, target_reps,
                     rest_seconds, order_index)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(uuid::Uuid::now_v7().to_string())
            .bind(id)
            .bind(&exercise.exercise_id)
            .bind(exercise.target_sets)
            .bind(&exercise.target_reps)
            .bind(exercise.rest_seconds.unwrap_or(60))
            .bind(index as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
    }

    get_routine(pool, id).await
}

/// Returns true when a row was deleted. Day assignments go with the
/// routine via ON DELETE CASCADE.
pub async fn delete_routine(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM routines WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
