use crate::error::AppError;
use crate::models::ClientProfile;
use sqlx::SqlitePool;

pub async fn create_profile(
    pool: &SqlitePool,
    gym_id: &str,
    display_name: &str,
) -> Result<ClientProfile, AppError> {
    let id = uuid::Uuid::now_v7().to_string();

    sqlx::query(
        r#"
        INSERT INTO client_profiles (id, gym_id, display_name)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(gym_id)
    .bind(display_name)
    .execute(pool)
    .await?;

    find_profile(pool, &id).await?.ok_or(AppError::Internal(
        "Failed to retrieve created profile".to_string(),
    ))
}

pub async fn find_profile(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<ClientProfile>, AppError> {
    let profile = sqlx::query_as::<_, ClientProfile>(
        r#"
        SELECT id, gym_id, display_name, created_at
        FROM client_profiles
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(profile)
}
