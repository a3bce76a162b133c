//! Schedule resolver: merges self- and professionally-assigned routines
//! into a single per-day list, deduplicated and tagged with ownership.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, NaiveDate};
use sqlx::SqlitePool;

use crate::db;
use crate::error::AppError;
use crate::models::{AssignedRoutine, ScheduledRoutine, TodaySchedule};

/// Day-of-week with 0 = Sunday, matching the stored convention.
pub fn day_of_week(date: NaiveDate) -> i64 {
    date.weekday().num_days_from_sunday() as i64
}

pub fn validate_day_of_week(day: i64) -> Result<(), AppError> {
    if (0..=6).contains(&day) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "day_of_week must be between 0 and 6, got {day}"
        )))
    }
}

/// Keeps the first occurrence of each routine id. The uniqueness invariant
/// on assignments should make duplicates impossible, but a routine reached
/// through two rows on the same day must still resolve to one entry.
fn dedupe_by_routine(rows: Vec<AssignedRoutine>) -> Vec<AssignedRoutine> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.routine.id.clone()))
        .collect()
}

fn tag_ownership(rows: Vec<AssignedRoutine>, profile_id: &str) -> Vec<ScheduledRoutine> {
    rows.into_iter()
        .map(|row| {
            let is_own = row.routine.is_owned_by(profile_id);
            ScheduledRoutine {
                routine: row.routine,
                is_own,
            }
        })
        .collect()
}

/// The ordered, deduplicated routine list for one member and one day.
/// A day with no assignments yields an empty list (rest day).
pub async fn resolve_day(
    pool: &SqlitePool,
    profile_id: &str,
    day: i64,
) -> Result<Vec<ScheduledRoutine>, AppError> {
    validate_day_of_week(day)?;
    let rows = db::list_assigned_routines_for_day(pool, profile_id, day).await?;
    Ok(tag_ownership(dedupe_by_routine(rows), profile_id))
}

/// Full week view: day-indexed map covering all seven days, empty days
/// included.
pub async fn resolve_week(
    pool: &SqlitePool,
    profile_id: &str,
) -> Result<BTreeMap<i64, Vec<ScheduledRoutine>>, AppError> {
    let rows = db::list_assigned_routines_for_week(pool, profile_id).await?;

    let mut by_day: BTreeMap<i64, Vec<AssignedRoutine>> =
        (0..7).map(|day| (day, Vec::new())).collect();
    for row in rows {
        by_day.entry(row.day_of_week).or_default().push(row);
    }

    Ok(by_day
        .into_iter()
        .map(|(day, rows)| (day, tag_ownership(dedupe_by_routine(rows), profile_id)))
        .collect())
}

/// Today's routines plus the routine ids already covered by a completed
/// session on that date.
pub async fn today_schedule(
    pool: &SqlitePool,
    profile_id: &str,
    date: NaiveDate,
) -> Result<TodaySchedule, AppError> {
    let routines = resolve_day(pool, profile_id, day_of_week(date)).await?;

    let date_str = date.format("%Y-%m-%d").to_string();
    let completed = db::find_completed_sessions_on(pool, profile_id, &date_str).await?;

    let mut seen = HashSet::new();
    let mut completed_routine_ids = Vec::new();
    for session in &completed {
        for routine_id in session.routine_ids.0.iter() {
            if seen.insert(routine_id.clone()) {
                completed_routine_ids.push(routine_id.clone());
            }
        }
    }

    Ok(TodaySchedule {
        routines,
        completed_routine_ids,
    })
}
