//! Tauri Commands for the Todo Collection
//!
//! Thin wrappers over the repository adapter. Failures are logged here and
//! stringified at the IPC boundary; the frontend turns them into banner
//! messages. Writes never touch UI state directly - the snapshot events do.

use tauri::State;
use tracing::warn;

use skylist_core::{Todo, TodoStore};

use crate::AppState;

/// Full collection contents, newest first
#[tauri::command]
pub async fn list_todos(state: State<'_, AppState>) -> Result<Vec<Todo>, String> {
    let repo = state.repo().await?;
    repo.list().await.map_err(|e| e.to_string())
}

/// Create a todo; blank text is a no-op
#[tauri::command]
pub async fn add_todo(state: State<'_, AppState>, text: String) -> Result<Option<Todo>, String> {
    let repo = state.repo().await?;
    repo.add(&text).await.map_err(|e| {
        warn!(error = %e, "add failed");
        e.to_string()
    })
}

/// Flip completion of one todo
#[tauri::command]
pub async fn toggle_todo(
    state: State<'_, AppState>,
    id: String,
    current_completed: bool,
) -> Result<Todo, String> {
    let repo = state.repo().await?;
    repo.toggle(&id, current_completed).await.map_err(|e| {
        warn!(error = %e, "toggle failed");
        e.to_string()
    })
}

/// Replace the text of one todo; blank or unchanged text is a no-op
#[tauri::command]
pub async fn rename_todo(
    state: State<'_, AppState>,
    id: String,
    new_text: String,
    original_text: String,
) -> Result<bool, String> {
    let repo = state.repo().await?;
    repo.rename(&id, &new_text, &original_text)
        .await
        .map_err(|e| {
            warn!(error = %e, "rename failed");
            e.to_string()
        })
}

/// Delete one todo
#[tauri::command]
pub async fn delete_todo(state: State<'_, AppState>, id: String) -> Result<(), String> {
    let repo = state.repo().await?;
    repo.delete(&id).await.map_err(|e| {
        warn!(error = %e, "delete failed");
        e.to_string()
    })
}

/// Remove every completed todo in one atomic batch
#[tauri::command]
pub async fn clear_completed(state: State<'_, AppState>) -> Result<u64, String> {
    let repo = state.repo().await?;
    repo.clear_completed().await.map_err(|e| {
        warn!(error = %e, "clear completed failed");
        e.to_string()
    })
}
