use serde::{Deserialize, Serialize};

use super::routine::Routine;

/// Assignment origin discriminator values stored in
/// `day_assignments.assigned_by`.
pub const ASSIGNED_SELF: &str = "self";
pub const ASSIGNED_PROFESSIONAL: &str = "professional";

/// A (routine, day-of-week, member) link. Self- and professionally-authored
/// assignments live in the same table, distinguished by `assigned_by`.
/// Day-of-week follows the 0 = Sunday convention.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DayAssignment {
    pub id: String,
    pub client_profile_id: String,
    pub routine_id: String,
    pub day_of_week: i64,
    /// "self" or "professional".
    pub assigned_by: String,
    pub sort_order: i64,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateAssignmentRequest {
    pub day_of_week: i64,
    pub sort_order: Option<i64>,
    /// When a professional assigns their routine to a client this carries
    /// the client's profile id; absent for self-assignment.
    pub client_profile_id: Option<String>,
}

/// Joined row used by the schedule resolver: one assignment together with
/// the routine it schedules.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AssignedRoutine {
    pub assignment_id: String,
    pub day_of_week: i64,
    pub assigned_by: String,
    pub sort_order: i64,
    #[sqlx(flatten)]
    pub routine: Routine,
}
