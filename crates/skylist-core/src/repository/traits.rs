//! Repository Layer - Core Trait
//!
//! The seam between UI actions and the document store. Implementations can
//! use libsql, in-memory fakes, etc.

use async_trait::async_trait;

use crate::domain::{StoreResult, Todo};

/// Operations on one user's todo collection
///
/// All operations are async and fire-and-await: once issued they are not
/// cancellable, and none of them retries on failure.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Create a todo from user input
    ///
    /// Returns `None` without writing when the trimmed text is empty.
    async fn add(&self, text: &str) -> StoreResult<Option<Todo>>;

    /// Flip completion to the opposite of `current_completed`
    async fn toggle(&self, id: &str, current_completed: bool) -> StoreResult<Todo>;

    /// Replace the text of a todo
    ///
    /// Returns `false` without writing when the trimmed text is empty or
    /// equals `original_text`.
    async fn rename(&self, id: &str, new_text: &str, original_text: &str) -> StoreResult<bool>;

    /// Delete one todo; deleting an absent id is a no-op
    async fn delete(&self, id: &str) -> StoreResult<()>;

    /// Delete every completed todo in one atomic batch
    ///
    /// Returns the number of removed todos; zero completed todos is a no-op.
    async fn clear_completed(&self) -> StoreResult<u64>;

    /// Full collection contents, newest first
    async fn list(&self) -> StoreResult<Vec<Todo>>;
}
