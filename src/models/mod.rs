//! Data model structs: sqlx row mappings plus request/response DTOs.

pub mod assignment;
pub mod exercise;
pub mod profile;
pub mod progress;
pub mod routine;
pub mod session;

pub use assignment::*;
pub use exercise::*;
pub use profile::*;
pub use progress::*;
pub use routine::*;
pub use session::*;
