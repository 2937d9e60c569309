//! Skylist Core
//!
//! Layered architecture:
//! - domain: Core entities and error taxonomy
//! - config: Explicit store configuration (no ambient globals)
//! - session: Backend initialization and anonymous sign-in
//! - repository: Scoped todo collection access
//! - subscription: Live snapshot feed

pub mod config;
pub mod domain;
pub mod repository;
pub mod session;
pub mod subscription;

pub use config::{StoreConfig, DEFAULT_APP_ID};
pub use domain::{Entity, StoreError, StoreResult, Todo};
pub use repository::{CollectionScope, TodoRepository, TodoStore};
pub use session::{sign_in, Backend, UserIdentity};
pub use subscription::{Snapshot, SnapshotStream, TodoFeed};
