//! Repository layer — entity-scoped database operations.

mod user;

pub use user::*;
