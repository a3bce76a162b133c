//! Session lifecycle integration tests: idempotent start and complete,
//! the terminal completed state, and append-only exercise logging.

mod common;

use chrono::NaiveDate;
use gymtrack::error::AppError;
use gymtrack::models::{
    SeriesEntry, ASSIGNED_PROFESSIONAL, ASSIGNED_SELF, OWNER_MEMBER, OWNER_PROFESSIONAL,
};
use gymtrack::services::sessions;

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 24).unwrap()
}

fn series() -> Vec<SeriesEntry> {
    vec![
        SeriesEntry {
            set_number: 1,
            reps: 10,
            weight: 60.0,
        },
        SeriesEntry {
            set_number: 2,
            reps: 8,
            weight: 62.5,
        },
    ]
}

#[tokio::test]
async fn starting_twice_with_same_routine_is_idempotent() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Ana").await;
    let routine = common::seed_routine(&pool, &member.id, OWNER_MEMBER, "Push day").await;

    let (first, is_new) =
        sessions::start_session(&pool, &member.id, common::GYM, monday(), Some(&routine.id), None)
            .await
            .unwrap();
    assert!(is_new);

    let (second, is_new) =
        sessions::start_session(&pool, &member.id, common::GYM, monday(), Some(&routine.id), None)
            .await
            .unwrap();
    assert!(!is_new);
    assert_eq!(first.id, second.id);
}

#[tokio::test]
async fn start_without_routine_covers_the_day_schedule() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Ben").await;
    let a = common::seed_routine(&pool, &member.id, OWNER_MEMBER, "Routine A").await;
    let b = common::seed_routine(&pool, &member.id, OWNER_MEMBER, "Routine B").await;
    common::seed_assignment(&pool, &member.id, &a.id, 1, ASSIGNED_SELF).await;
    common::seed_assignment(&pool, &member.id, &b.id, 1, ASSIGNED_SELF).await;

    let (session, is_new) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();
    assert!(is_new);
    assert_eq!(session.routine_ids.0.len(), 2);
    assert!(session.covers_routine(&a.id));
    assert!(session.covers_routine(&b.id));
    assert_eq!(session.is_free_workout, 0);

    // A second schedule-wide start resumes the same open session.
    let (resumed, is_new) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();
    assert!(!is_new);
    assert_eq!(resumed.id, session.id);
}

#[tokio::test]
async fn empty_day_start_creates_a_free_workout() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Cara").await;

    let (session, is_new) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();
    assert!(is_new);
    assert!(session.routine_ids.0.is_empty());
    assert_eq!(session.is_free_workout, 1);
}

#[tokio::test]
async fn completions_preserve_insertion_order() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Dan").await;
    let squat = common::seed_exercise(&pool, "Back squat", "legs", Some(1.0)).await;
    let press = common::seed_exercise(&pool, "Bench press", "chest", None).await;

    let (session, _) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();

    sessions::record_exercise(
        &pool,
        &member.id,
        &session.id,
        &squat.id,
        Some(3),
        Some("8-12"),
        &series(),
    )
    .await
    .unwrap();
    let detail = sessions::record_exercise(
        &pool,
        &member.id,
        &session.id,
        &press.id,
        Some(3),
        Some("8-12"),
        &series(),
    )
    .await
    .unwrap();

    assert_eq!(detail.completions.len(), 2);
    assert_eq!(detail.completions[0].exercise_id, squat.id);
    assert_eq!(detail.completions[1].exercise_id, press.id);

    // Both entries survive completion, still in order.
    sessions::complete_session(&pool, &member.id, &session.id, None, None)
        .await
        .unwrap();
    let after = sessions::session_detail(&pool, &member.id, &session.id)
        .await
        .unwrap();
    assert_eq!(after.completions.len(), 2);
    assert_eq!(after.completions[0].exercise_id, squat.id);
    assert_eq!(after.completions[1].exercise_id, press.id);
}

#[tokio::test]
async fn recording_on_a_completed_session_is_invalid_state() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Eva").await;
    let squat = common::seed_exercise(&pool, "Back squat", "legs", None).await;

    let (session, _) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();
    sessions::complete_session(&pool, &member.id, &session.id, Some(30), None)
        .await
        .unwrap();

    let err = sessions::record_exercise(
        &pool,
        &member.id,
        &session.id,
        &squat.id,
        None,
        None,
        &series(),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn completing_twice_returns_the_original_record() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Finn").await;

    let (session, _) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();

    let (first, is_duplicate) =
        sessions::complete_session(&pool, &member.id, &session.id, Some(45), Some(300.0))
            .await
            .unwrap();
    assert!(!is_duplicate);
    assert_eq!(first.duration_minutes, Some(45));
    assert_eq!(first.calories_burned, Some(300.0));

    // Retried completion with different values changes nothing.
    let (second, is_duplicate) =
        sessions::complete_session(&pool, &member.id, &session.id, Some(90), Some(999.0))
            .await
            .unwrap();
    assert!(is_duplicate);
    assert_eq!(second.id, first.id);
    assert_eq!(second.duration_minutes, Some(45));
    assert_eq!(second.calories_burned, Some(300.0));
    assert_eq!(second.completed_at, first.completed_at);
}

#[tokio::test]
async fn absent_duration_and_calories_stay_unset() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Gil").await;

    let (session, _) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();
    let (completed, _) = sessions::complete_session(&pool, &member.id, &session.id, None, None)
        .await
        .unwrap();

    assert_eq!(completed.duration_minutes, None);
    assert_eq!(completed.calories_burned, None);
}

#[tokio::test]
async fn foreign_private_routine_reads_as_not_found() {
    let pool = common::test_pool().await;
    let owner = common::seed_member(&pool, "Kai").await;
    let intruder = common::seed_member(&pool, "Lea").await;
    let private = common::seed_routine(&pool, &owner.id, OWNER_MEMBER, "Private push").await;

    // Not owned, not assigned, not a template: invisible to the intruder.
    let err = sessions::start_session(
        &pool,
        &intruder.id,
        common::GYM,
        monday(),
        Some(&private.id),
        None,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn assigned_professional_routine_can_be_started() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Mia").await;
    let routine = common::seed_routine(&pool, "coach-1", OWNER_PROFESSIONAL, "Leg day").await;
    common::seed_assignment(&pool, &member.id, &routine.id, 1, ASSIGNED_PROFESSIONAL).await;

    let (session, is_new) = sessions::start_session(
        &pool,
        &member.id,
        common::GYM,
        monday(),
        Some(&routine.id),
        None,
    )
    .await
    .unwrap();
    assert!(is_new);
    assert!(session.covers_routine(&routine.id));
}

#[tokio::test]
async fn other_members_sessions_read_as_not_found() {
    let pool = common::test_pool().await;
    let owner = common::seed_member(&pool, "Hana").await;
    let intruder = common::seed_member(&pool, "Ivo").await;

    let (session, _) = sessions::start_session(&pool, &owner.id, common::GYM, monday(), None, None)
        .await
        .unwrap();

    let err = sessions::complete_session(&pool, &intruder.id, &session.id, None, None)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn malformed_series_is_rejected() {
    let pool = common::test_pool().await;
    let member = common::seed_member(&pool, "Jo").await;
    let squat = common::seed_exercise(&pool, "Back squat", "legs", None).await;

    let (session, _) = sessions::start_session(&pool, &member.id, common::GYM, monday(), None, None)
        .await
        .unwrap();

    let err = sessions::record_exercise(
        &pool,
        &member.id,
        &session.id,
        &squat.id,
        None,
        None,
        &[],
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
}
