//! Data-access layer. Route handlers and services call these functions;
//! nothing here contains business rules beyond the queries themselves.

pub mod assignments;
pub mod exercises;
pub mod profiles;
pub mod routines;
pub mod sessions;

pub use assignments::*;
pub use exercises::*;
pub use profiles::*;
pub use routines::*;
pub use sessions::*;
