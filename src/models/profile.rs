use serde::{Deserialize, Serialize};

/// Member-facing profile, distinct from the authentication identity.
/// Profile CRUD lives in the tenant-management service; this core only
/// needs lookups (and inserts for seeding).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ClientProfile {
    pub id: String,
    pub gym_id: String,
    pub display_name: String,
    pub created_at: String,
}
