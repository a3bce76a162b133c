//! Routine update integration tests against the real schema.

mod common;

use gymtrack::db;
use gymtrack::models::{UpdateRoutineRequest, OWNER_MEMBER};

fn patch() -> UpdateRoutineRequest {
    UpdateRoutineRequest {
        name: None,
        category: None,
        level: None,
        intensity: None,
        estimated_minutes: None,
        is_template: None,
        exercises: None,
    }
}

#[tokio::test]
async fn partial_update_changes_only_present_fields() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Ana").await;
    let routine = common::seed_routine(&pool, &member.id, OWNER_MEMBER, "Push day").await;

    let req = UpdateRoutineRequest {
        category: Some("strength".to_string()),
        level: Some(4),
        intensity: Some(5),
        estimated_minutes: Some(60),
        is_template: Some(true),
        ..patch()
    };
    let updated = db::update_routine(&pool, &routine.id, &req)
        .await
        .unwrap()
        .unwrap();

    // Absent fields stay put; numeric fields read back as integers.
    assert_eq!(updated.name, "Push day");
    assert_eq!(updated.category.as_deref(), Some("strength"));
    assert_eq!(updated.level, 4);
    assert_eq!(updated.intensity, 5);
    assert_eq!(updated.estimated_minutes, Some(60));
    assert_eq!(updated.is_template, 1);
}

#[tokio::test]
async fn empty_update_only_touches_the_timestamp() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Ben").await;
    let routine = common::seed_routine(&pool, &member.id, OWNER_MEMBER, "Pull day").await;

    let updated = db::update_routine(&pool, &routine.id, &patch())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.name, routine.name);
    assert_eq!(updated.level, routine.level);
    assert_eq!(updated.intensity, routine.intensity);
    assert_eq!(updated.created_at, routine.created_at);
}
