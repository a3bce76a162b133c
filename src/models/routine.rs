use serde::{Deserialize, Serialize};

/// Routine owner discriminator values stored in `routines.owner_kind`.
pub const OWNER_MEMBER: &str = "member";
pub const OWNER_PROFESSIONAL: &str = "professional";

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Routine {
    pub id: String,
    pub owner_id: String,
    /// "member" or "professional".
    pub owner_kind: String,
    pub gym_id: String,
    pub name: String,
    pub category: Option<String>,
    /// Difficulty level, 1..=5.
    pub level: i64,
    /// Planned intensity, 1..=5.
    pub intensity: i64,
    pub estimated_minutes: Option<i64>,
    pub is_template: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Routine {
    /// Whether the given member profile authored this routine.
    pub fn is_owned_by(&self, profile_id: &str) -> bool {
        self.owner_kind == OWNER_MEMBER && self.owner_id == profile_id
    }
}

/// One ordered entry of a routine's exercise list.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RoutineExercise {
    pub id: String,
    pub routine_id: String,
    pub exercise_id: String,
    pub target_sets: i64,
    /// Free-form target, e.g. "8-12".
    pub target_reps: String,
    pub rest_seconds: i64,
    pub order_index: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoutineExerciseInput {
    pub exercise_id: String,
    pub target_sets: i64,
    pub target_reps: String,
    pub rest_seconds: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateRoutineRequest {
    pub name: String,
    pub category: Option<String>,
    pub level: Option<i64>,
    pub intensity: Option<i64>,
    pub estimated_minutes: Option<i64>,
    pub is_template: Option<bool>,
    #[serde(default)]
    pub exercises: Vec<RoutineExerciseInput>,
}

/// Partial update; absent fields are left unchanged. When `exercises` is
/// present the whole ordered list is replaced.
#[derive(Debug, Deserialize)]
pub struct UpdateRoutineRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub level: Option<i64>,
    pub intensity: Option<i64>,
    pub estimated_minutes: Option<i64>,
    pub is_template: Option<bool>,
    pub exercises: Option<Vec<RoutineExerciseInput>>,
}

#[derive(Debug, Serialize)]
pub struct RoutineWithExercises {
    #[serde(flatten)]
    pub routine: Routine,
    pub exercises: Vec<RoutineExercise>,
}

/// A routine resolved onto a member's day, tagged with ownership.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduledRoutine {
    #[serde(flatten)]
    pub routine: Routine,
    pub is_own: bool,
}
