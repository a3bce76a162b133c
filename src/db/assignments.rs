//! Day-assignment queries.
//!
//! The (client_profile_id, routine_id, day_of_week) triple is unique;
//! `create_assignment` relies on INSERT OR IGNORE so a duplicate insert is
//! a no-op success returning the existing row, which keeps day-picker UIs
//! idempotent.

use crate::error::AppError;
use crate::models::{AssignedRoutine, DayAssignment};
use sqlx::SqlitePool;

const ASSIGNMENT_COLUMNS: &str =
    "id, client_profile_id, routine_id, day_of_week, assigned_by, sort_order, created_at";

pub async fn create_assignment(
    pool: &SqlitePool,
    client_profile_id: &str,
    routine_id: &str,
    day_of_week: i64,
    assigned_by: &str,
    sort_order: i64,
) -> Result<DayAssignment, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO day_assignments
            (id, client_profile_id, routine_id, day_of_week, assigned_by, sort_order)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(client_profile_id)
    .bind(routine_id)
    .bind(day_of_week)
    .bind(assigned_by)
    .bind(sort_order)
    .execute(pool)
    .await?;

    // Fetch by the unique triple: covers both the fresh insert and the
    // ignored duplicate.
    let assignment = sqlx::query_as::<_, DayAssignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM day_assignments \
         WHERE client_profile_id = ? AND routine_id = ? AND day_of_week = ?"
    ))
    .bind(client_profile_id)
    .bind(routine_id)
    .bind(day_of_week)
    .fetch_optional(pool)
    .await?;

    assignment.ok_or(AppError::Internal(
        "Failed to retrieve created assignment".to_string(),
    ))
}

pub async fn find_assignment(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<DayAssignment>, AppError> {
    let assignment = sqlx::query_as::<_, DayAssignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM day_assignments WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(assignment)
}

pub async fn delete_assignment(pool: &SqlitePool, id: &str) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM day_assignments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn list_assignments_for_routine(
    pool: &SqlitePool,
    routine_id: &str,
    client_profile_id: &str,
) -> Result<Vec<DayAssignment>, AppError> {
    let assignments = sqlx::query_as::<_, DayAssignment>(&format!(
        "SELECT {ASSIGNMENT_COLUMNS} FROM day_assignments \
         WHERE routine_id = ? AND client_profile_id = ? \
         ORDER BY day_of_week"
    ))
    .bind(routine_id)
    .bind(client_profile_id)
    .fetch_all(pool)
    .await?;

    Ok(assignments)
}

/// One unified query across both assignment origins for a single day,
/// joined with the routines it schedules. Ordered by the explicit sort
/// order, creation order breaking ties (the time-ordered id breaks
/// same-millisecond timestamps).
pub async fn list_assigned_routines_for_day(
    pool: &SqlitePool,
    client_profile_id: &str,
    day_of_week: i64,
) -> Result<Vec<AssignedRoutine>, AppError> {
    let rows = sqlx::query_as::<_, AssignedRoutine>(
        r#"
        SELECT a.id AS assignment_id, a.day_of_week, a.assigned_by, a.sort_order,
               r.id, r.owner_id, r.owner_kind, r.gym_id, r.name, r.category,
               r.level, r.intensity, r.estimated_minutes, r.is_template,
               r.created_at, r.updated_at
        FROM day_assignments a
        JOIN routines r ON r.id = a.routine_id
        WHERE a.client_profile_id = ? AND a.day_of_week = ?
        ORDER BY a.sort_order, a.created_at, a.id
        "#,
    )
    .bind(client_profile_id)
    .bind(day_of_week)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Same join across the whole week, ordered day first.
pub async fn list_assigned_routines_for_week(
    pool: &SqlitePool,
    client_profile_id: &str,
) -> Result<Vec<AssignedRoutine>, AppError> {
    let rows = sqlx::query_as::<_, AssignedRoutine>(
        r#"
        SELECT a.id AS assignment_id, a.day_of_week, a.assigned_by, a.sort_order,
               r.id, r.owner_id, r.owner_kind, r.gym_id, r.name, r.category,
               r.level, r.intensity, r.estimated_minutes, r.is_template,
               r.created_at, r.updated_at
        FROM day_assignments a
        JOIN routines r ON r.id = a.routine_id
        WHERE a.client_profile_id = ?
        ORDER BY a.day_of_week, a.sort_order, a.created_at, a.id
        "#,
    )
    .bind(client_profile_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
