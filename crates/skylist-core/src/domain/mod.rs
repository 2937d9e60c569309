//! Domain Layer
//!
//! Contains the core entities and error taxonomy.
//! This layer has NO external dependencies (except serde/chrono/uuid for
//! serialization and id/timestamp assignment).

mod entity;
mod todo;

pub use entity::{Entity, StoreError, StoreResult};
pub use todo::Todo;
