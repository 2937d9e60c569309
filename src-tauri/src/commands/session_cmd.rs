//! Session Command
//!
//! Lets the frontend ask for the session after it missed the startup events
//! (the webview may load after session-ready fired).

use tauri::State;

use skylist_core::UserIdentity;

use crate::AppState;

/// Current session identity, `None` while startup is still in flight
#[tauri::command]
pub async fn get_session(state: State<'_, AppState>) -> Result<Option<UserIdentity>, String> {
    Ok(state.identity().await)
}
