//! Shared fixtures: an in-memory pool with the real migrations applied,
//! plus seed helpers for profiles, exercises, routines and assignments.

#![allow(dead_code)]

use gymtrack::db;
use gymtrack::models::{ClientProfile, CreateRoutineRequest, DayAssignment, Exercise, Routine};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

pub const GYM: &str = "gym-1";

pub async fn test_pool() -> SqlitePool {
    // One connection: every handle must see the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");

    pool
}

pub async fn seed_member(pool: &SqlitePool, name: &str) -> ClientProfile {
    db::create_profile(pool, GYM, name)
        .await
        .expect("failed to seed profile")
}

pub async fn seed_exercise(
    pool: &SqlitePool,
    name: &str,
    muscle_group: &str,
    calories_per_rep: Option<f64>,
) -> Exercise {
    db::create_exercise(pool, name, muscle_group, calories_per_rep)
        .await
        .expect("failed to seed exercise")
}

pub async fn seed_routine(
    pool: &SqlitePool,
    owner_id: &str,
    owner_kind: &str,
    name: &str,
) -> Routine {
    let req = CreateRoutineRequest {
        name: name.to_string(),
        category: None,
        level: Some(2),
        intensity: Some(3),
        estimated_minutes: Some(45),
        is_template: None,
        exercises: Vec::new(),
    };
    db::create_routine(pool, owner_id, owner_kind, GYM, &req)
        .await
        .expect("failed to seed routine")
}

pub async fn seed_assignment(
    pool: &SqlitePool,
    profile_id: &str,
    routine_id: &str,
    day_of_week: i64,
    assigned_by: &str,
) -> DayAssignment {
    db::create_assignment(pool, profile_id, routine_id, day_of_week, assigned_by, 0)
        .await
        .expect("failed to seed assignment")
}
