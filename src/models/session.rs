use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// One performed set inside an exercise completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    pub set_number: i64,
    pub reps: i64,
    pub weight: f64,
}

/// One training occurrence. `routine_ids` is a snapshot of the routines the
/// session covered when it was started — deliberately not a live join, so
/// the session stays valid if a routine is later edited or deleted.
///
/// Lifecycle: open (`completed = 0`) → completed (`completed = 1`, terminal).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct WorkoutSession {
    pub id: String,
    pub client_profile_id: String,
    /// Calendar date, "YYYY-MM-DD".
    pub session_date: String,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: i64,
    pub routine_ids: Json<Vec<String>>,
    pub name: Option<String>,
    pub is_free_workout: i64,
    pub completed: i64,
    pub duration_minutes: Option<i64>,
    pub calories_burned: Option<f64>,
    pub started_at: String,
    pub completed_at: Option<String>,
}

impl WorkoutSession {
    pub fn is_completed(&self) -> bool {
        self.completed != 0
    }

    pub fn covers_routine(&self, routine_id: &str) -> bool {
        self.routine_ids.0.iter().any(|id| id == routine_id)
    }
}

/// One logged exercise within a session: the plan it came from and the
/// performed series. Append-only — never rewritten after insertion.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ExerciseCompletion {
    pub id: String,
    pub session_id: String,
    pub exercise_id: String,
    pub target_sets: Option<i64>,
    pub target_reps: Option<String>,
    pub series_data: Json<Vec<SeriesEntry>>,
    pub completed_at: String,
}

#[derive(Debug, Deserialize)]
pub struct StartSessionRequest {
    pub routine_id: Option<String>,
    pub name: Option<String>,
    /// Caller's local calendar date; defaults to the server's UTC date.
    pub date: Option<chrono::NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct RecordExerciseRequest {
    pub exercise_id: String,
    pub target_sets: Option<i64>,
    pub target_reps: Option<String>,
    pub series: Vec<SeriesEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteSessionRequest {
    pub duration_minutes: Option<i64>,
    pub calories_burned: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SessionWithCompletions {
    #[serde(flatten)]
    pub session: WorkoutSession,
    pub completions: Vec<ExerciseCompletion>,
}
