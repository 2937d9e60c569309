//! Todo Entity
//!
//! The single domain entity: one task in the user's collection.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Entity;

/// A todo item
///
/// `id` and `timestamp` are assigned by the store at creation and are stable
/// for the item's lifetime. `timestamp` exists only to order the rendered
/// list newest-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Todo {
    /// Unique document identifier within the user's collection
    pub id: String,
    /// Task text, never persisted empty
    pub text: String,
    /// Completion status
    pub completed: bool,
    /// Creation time in milliseconds since the epoch
    pub timestamp: i64,
}

impl Todo {
    /// Create a new incomplete todo with a fresh id and creation timestamp
    pub fn new(text: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            completed: false,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

impl Entity for Todo {
    type Id = String;

    fn id(&self) -> Self::Id {
        self.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_todo_creation() {
        let todo = Todo::new("Test task".to_string());
        assert!(!todo.id.is_empty());
        assert_eq!(todo.text, "Test task");
        assert!(!todo.completed);
        assert!(todo.timestamp > 0);
    }

    #[test]
    fn test_todo_ids_are_unique() {
        let a = Todo::new("a".to_string());
        let b = Todo::new("b".to_string());
        assert_ne!(a.id(), b.id());
    }
}
