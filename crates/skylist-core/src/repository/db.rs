//! Database Schema Bootstrap
//!
//! Additive migrations run at initialization. No destructive schema changes.

use libsql::Connection;

use crate::domain::{StoreError, StoreResult};

/// Create the tables and index the store relies on
pub async fn run_migrations(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            app_id TEXT NOT NULL,
            user_id TEXT NOT NULL,
            text TEXT NOT NULL,
            completed INTEGER NOT NULL DEFAULT 0,
            timestamp INTEGER NOT NULL
        )",
        (),
    )
    .await
    .map_err(|e| StoreError::Initialization(e.to_string()))?;

    // Collection scope + ordering key in one index
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_todos_scope ON todos(app_id, user_id, timestamp)",
        (),
    )
    .await
    .map_err(|e| StoreError::Initialization(e.to_string()))?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS sessions (
            user_id TEXT NOT NULL,
            anonymous INTEGER NOT NULL DEFAULT 1,
            created_at INTEGER NOT NULL
        )",
        (),
    )
    .await
    .map_err(|e| StoreError::Initialization(e.to_string()))?;

    Ok(())
}
