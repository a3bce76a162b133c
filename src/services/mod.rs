//! Business logic: schedule resolution, session lifecycle, progress
//! aggregation. Route handlers stay thin and delegate here.

pub mod progress;
pub mod schedule;
pub mod sessions;
