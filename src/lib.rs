//! Gymtrack core: weekly routine scheduling, workout-session lifecycle
//! and progress aggregation for gym tenants.
//!
//! Identity management, billing, media and tenant-config CRUD live in
//! sibling services; this crate consumes identity through the bearer-token
//! extractor and the exercise catalog through its lookup table.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
