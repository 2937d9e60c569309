//! Todo Repository Implementation
//!
//! libsql-backed implementation of TodoStore, scoped to one user's
//! collection. Every successful mutation republishes a full snapshot to the
//! live feed.

use async_trait::async_trait;
use libsql::Connection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, warn};

use crate::domain::{StoreError, StoreResult, Todo};
use crate::subscription::{SnapshotStream, TodoFeed};

use super::traits::TodoStore;

/// Identifies one user's todo collection
///
/// The path convention mirrors the document store layout:
/// `artifacts/{app_id}/users/{user_id}/todos/{todo_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionScope {
    pub app_id: String,
    pub user_id: String,
}

impl CollectionScope {
    pub fn new(app_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Path of the scoped collection
    pub fn collection_path(&self) -> String {
        format!("artifacts/{}/users/{}/todos", self.app_id, self.user_id)
    }

    /// Path of one document within the collection
    pub fn document_path(&self, id: &str) -> String {
        format!("{}/{}", self.collection_path(), id)
    }
}

/// libsql implementation of the todo store
pub struct TodoRepository {
    conn: Arc<Mutex<Connection>>,
    scope: CollectionScope,
    feed: TodoFeed,
}

impl TodoRepository {
    pub fn new(conn: Connection, scope: CollectionScope) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
            scope,
            feed: TodoFeed::new(),
        }
    }

    pub fn scope(&self) -> &CollectionScope {
        &self.scope
    }

    /// Open a live subscription to this collection
    pub fn subscribe(&self) -> SnapshotStream {
        self.feed.subscribe()
    }

    /// Push the current collection contents to all subscribers
    ///
    /// A failed read becomes a terminal `Listen` snapshot instead of a
    /// panic or silent drop.
    pub async fn publish(&self) {
        match self.list().await {
            Ok(todos) => self.feed.publish(Ok(todos)),
            Err(e) => {
                error!(path = %self.scope.collection_path(), error = %e, "snapshot publish failed");
                self.feed.publish(Err(StoreError::Listen(e.to_string())));
            }
        }
    }

    /// Look up one todo within the scope
    pub async fn find(&self, id: &str) -> StoreResult<Option<Todo>> {
        let conn = self.conn.lock().await;

        let mut rows = conn
            .query(
                "SELECT id, text, completed, timestamp FROM todos
                 WHERE id = ? AND app_id = ? AND user_id = ?",
                libsql::params![id, self.scope.app_id.clone(), self.scope.user_id.clone()],
            )
            .await
            .map_err(|e| StoreError::Listen(e.to_string()))?;

        if let Ok(Some(row)) = rows.next().await {
            Ok(Some(row_to_todo(&row)?))
        } else {
            Ok(None)
        }
    }
}

#[async_trait]
impl TodoStore for TodoRepository {
    async fn add(&self, text: &str) -> StoreResult<Option<Todo>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let todo = Todo::new(trimmed.to_string());
        {
            let conn = self.conn.lock().await;
            conn.execute(
                "INSERT INTO todos (id, app_id, user_id, text, completed, timestamp)
                 VALUES (?, ?, ?, ?, ?, ?)",
                libsql::params![
                    todo.id.clone(),
                    self.scope.app_id.clone(),
                    self.scope.user_id.clone(),
                    todo.text.clone(),
                    0,
                    todo.timestamp
                ],
            )
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        }

        debug!(path = %self.scope.document_path(&todo.id), "todo created");
        self.publish().await;
        Ok(Some(todo))
    }

    async fn toggle(&self, id: &str, current_completed: bool) -> StoreResult<Todo> {
        // The lookup runs on behalf of a mutation, so its failures are writes
        let mut todo = self
            .find(id)
            .await
            .map_err(|e| match e {
                StoreError::Listen(msg) => StoreError::Write(msg),
                other => other,
            })?
            .ok_or_else(|| StoreError::NotFound(self.scope.document_path(id)))?;
        todo.completed = !current_completed;

        {
            let conn = self.conn.lock().await;
            conn.execute(
                "UPDATE todos SET completed = ? WHERE id = ? AND app_id = ? AND user_id = ?",
                libsql::params![
                    if todo.completed { 1 } else { 0 },
                    id,
                    self.scope.app_id.clone(),
                    self.scope.user_id.clone()
                ],
            )
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?;
        }

        self.publish().await;
        Ok(todo)
    }

    async fn rename(&self, id: &str, new_text: &str, original_text: &str) -> StoreResult<bool> {
        let trimmed = new_text.trim();
        // Blank or unchanged text exits edit mode without a write
        if trimmed.is_empty() || trimmed == original_text {
            return Ok(false);
        }

        let changed = {
            let conn = self.conn.lock().await;
            conn.execute(
                "UPDATE todos SET text = ? WHERE id = ? AND app_id = ? AND user_id = ?",
                libsql::params![
                    trimmed,
                    id,
                    self.scope.app_id.clone(),
                    self.scope.user_id.clone()
                ],
            )
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?
        };

        if changed == 0 {
            return Err(StoreError::NotFound(self.scope.document_path(id)));
        }

        self.publish().await;
        Ok(true)
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        let changed = {
            let conn = self.conn.lock().await;
            conn.execute(
                "DELETE FROM todos WHERE id = ? AND app_id = ? AND user_id = ?",
                libsql::params![id, self.scope.app_id.clone(), self.scope.user_id.clone()],
            )
            .await
            .map_err(|e| StoreError::Write(e.to_string()))?
        };

        if changed == 0 {
            warn!(path = %self.scope.document_path(id), "delete of absent todo");
        }

        self.publish().await;
        Ok(())
    }

    async fn clear_completed(&self) -> StoreResult<u64> {
        let removed = {
            let conn = self.conn.lock().await;

            let mut rows = conn
                .query(
                    "SELECT COUNT(*) FROM todos
                     WHERE completed = 1 AND app_id = ? AND user_id = ?",
                    libsql::params![self.scope.app_id.clone(), self.scope.user_id.clone()],
                )
                .await
                .map_err(|e| StoreError::Write(e.to_string()))?;

            let count = if let Ok(Some(row)) = rows.next().await {
                row.get::<i64>(0).unwrap_or(0)
            } else {
                0
            };

            if count == 0 {
                return Ok(0);
            }

            // One transaction so the batch removal is all-or-nothing
            let tx = conn
                .transaction()
                .await
                .map_err(|e| StoreError::Write(e.to_string()))?;
            let removed = tx
                .execute(
                    "DELETE FROM todos WHERE completed = 1 AND app_id = ? AND user_id = ?",
                    libsql::params![self.scope.app_id.clone(), self.scope.user_id.clone()],
                )
                .await
                .map_err(|e| StoreError::Write(e.to_string()))?;
            tx.commit()
                .await
                .map_err(|e| StoreError::Write(e.to_string()))?;
            removed
        };

        debug!(path = %self.scope.collection_path(), removed, "cleared completed todos");
        self.publish().await;
        Ok(removed)
    }

    async fn list(&self) -> StoreResult<Vec<Todo>> {
        let conn = self.conn.lock().await;

        // rowid breaks ties so same-millisecond inserts stay newest-first
        let mut rows = conn
            .query(
                "SELECT id, text, completed, timestamp FROM todos
                 WHERE app_id = ? AND user_id = ?
                 ORDER BY timestamp DESC, rowid DESC",
                libsql::params![self.scope.app_id.clone(), self.scope.user_id.clone()],
            )
            .await
            .map_err(|e| StoreError::Listen(e.to_string()))?;

        let mut todos = Vec::new();
        while let Ok(Some(row)) = rows.next().await {
            todos.push(row_to_todo(&row)?);
        }
        Ok(todos)
    }
}

/// Convert a database row to a Todo
fn row_to_todo(row: &libsql::Row) -> StoreResult<Todo> {
    Ok(Todo {
        id: row
            .get::<String>(0)
            .map_err(|e| StoreError::Listen(e.to_string()))?,
        text: row
            .get::<String>(1)
            .map_err(|e| StoreError::Listen(e.to_string()))?,
        completed: row
            .get::<i32>(2)
            .map_err(|e| StoreError::Listen(e.to_string()))?
            != 0,
        timestamp: row
            .get::<i64>(3)
            .map_err(|e| StoreError::Listen(e.to_string()))?,
    })
}
