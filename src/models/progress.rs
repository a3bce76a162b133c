//! Read-side DTOs produced by the progress aggregator. Nothing here is
//! persisted; every struct is derived from the session history on demand.

use serde::Serialize;

use super::routine::ScheduledRoutine;
use super::session::WorkoutSession;

/// All-time totals plus the current consecutive-day streak.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressOverview {
    pub total_sessions: i64,
    pub total_minutes: i64,
    pub total_calories: f64,
    pub total_exercises: i64,
    pub current_streak: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyBucket {
    /// ISO week label, e.g. "2026-W34".
    pub week: String,
    pub sessions: i64,
    pub calories: f64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    /// Calendar month label, e.g. "2026-08".
    pub month: String,
    pub sessions: i64,
    pub calories: f64,
    pub growth_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MuscleGroupHeat {
    pub muscle_group: String,
    pub count: i64,
    /// 0–100, normalized against the most-trained group.
    pub heat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieLeader {
    pub exercise_id: String,
    pub name: String,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseIntensity {
    pub exercise_id: String,
    pub name: String,
    /// 0–100 weighted score (avg weight 40%, total reps 35%, sets 25%).
    pub score: f64,
    /// "Low" | "Medium" | "High" | "Very High".
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ProgressReport {
    pub overview: ProgressOverview,
    pub weekly_data: Vec<WeeklyBucket>,
    pub monthly_data: Vec<MonthlyBucket>,
    pub top_muscle_groups: Vec<MuscleGroupHeat>,
    pub top_calorie_exercises: Vec<CalorieLeader>,
    pub recent_sessions: Vec<WorkoutSession>,
    /// Completed-session count per day-of-week, index 0 = Sunday.
    pub sessions_by_day: [i64; 7],
}

#[derive(Debug, Serialize)]
pub struct TodaySchedule {
    pub routines: Vec<ScheduledRoutine>,
    /// Routine ids already covered by a completed session today.
    pub completed_routine_ids: Vec<String>,
}
