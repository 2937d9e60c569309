//! Repository Layer
//!
//! Scoped data access over the document store.

mod db;
mod todo_repo;
mod traits;

#[cfg(test)]
mod tests;

pub use db::run_migrations;
pub use todo_repo::{CollectionScope, TodoRepository};
pub use traits::TodoStore;
