//! HTTP handlers. Each handler extracts the authenticated member, calls
//! into `services`/`db` and shapes the JSON envelope.

pub mod exercises;
pub mod health;
pub mod progress;
pub mod routines;
pub mod schedule;
pub mod sessions;

pub use exercises::*;
pub use health::*;
pub use progress::*;
pub use routines::*;
pub use schedule::*;
pub use sessions::*;

use sqlx::SqlitePool;

/// Shared state injected into every handler via axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub jwt_secret: String,
}
