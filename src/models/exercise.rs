use serde::{Deserialize, Serialize};

/// Exercise catalog entry. The catalog is maintained elsewhere; this core
/// reads name, muscle group and the per-rep calorie coefficient.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    /// Per-rep calorie coefficient; `None` falls back to the default at
    /// aggregation time.
    pub calories_per_rep: Option<f64>,
    pub created_at: String,
}
