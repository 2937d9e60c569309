//! Domain Layer - Core Entity Trait
//!
//! This trait defines the basic contract for all domain entities.
//! All entities must have a unique ID and be thread-safe.

use serde::{Deserialize, Serialize};

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the entity's unique identifier
    fn id(&self) -> Self::Id;
}

/// Common result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store-level errors
///
/// - `Initialization`: backend unreachable or misconfigured. Fatal, never retried.
/// - `Listen`: the live query failed or dropped. Fatal for the subscription.
/// - `Write`: a create/update/delete failed. Non-fatal, surfaced to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreError {
    Initialization(String),
    Listen(String),
    Write(String),
    NotFound(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Initialization(msg) => write!(f, "initialization failed: {}", msg),
            StoreError::Listen(msg) => write!(f, "live query failed: {}", msg),
            StoreError::Write(msg) => write!(f, "write failed: {}", msg),
            StoreError::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}
