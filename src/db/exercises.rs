//! Exercise catalog lookups. The catalog is owned by the tenant-config
//! service; inserts here exist for seeding and tests.

use crate::error::AppError;
use crate::models::Exercise;
use sqlx::SqlitePool;

pub async fn create_exercise(
    pool: &SqlitePool,
    name: &str,
    muscle_group: &str,
    calories_per_rep: Option<f64>,
) -> Result<Exercise, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO exercises (id, name, muscle_group, calories_per_rep)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(name)
    .bind(muscle_group)
    .bind(calories_per_rep)
    .execute(pool)
    .await?;

    find_exercise(pool, &id).await?.ok_or(AppError::Internal(
        "Failed to retrieve created exercise".to_string(),
    ))
}

pub async fn find_exercise(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<Exercise>, AppError> {
    let exercise = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle_group, calories_per_rep, created_at
        FROM exercises
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(exercise)
}

pub async fn list_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>, AppError> {
    let exercises = sqlx::query_as::<_, Exercise>(
        r#"
        SELECT id, name, muscle_group, calories_per_rep, created_at
        FROM exercises
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(exercises)
}
