//! Skylist Backend
//!
//! Tauri shell around skylist-core:
//! - starts the backend session once per app load
//! - exposes the todo operations as IPC commands
//! - forwards live snapshots to the webview as events

use std::path::PathBuf;
use std::sync::Arc;

use tauri::{Emitter, Manager};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use skylist_core::{
    sign_in, Backend, CollectionScope, StoreConfig, TodoRepository, UserIdentity,
};

mod commands;

/// One initialized session: identity plus the shared backend handles
pub struct ActiveSession {
    pub identity: UserIdentity,
    pub backend: Arc<Backend>,
    pub repo: Arc<TodoRepository>,
}

/// Application state shared across commands
///
/// Empty until the async startup finishes; commands arriving earlier get a
/// readiness error instead of blocking.
#[derive(Clone, Default)]
pub struct AppState {
    session: Arc<Mutex<Option<ActiveSession>>>,
}

impl AppState {
    /// Repository handle for the current session
    pub async fn repo(&self) -> Result<Arc<TodoRepository>, String> {
        let guard = self.session.lock().await;
        match &*guard {
            Some(session) => Ok(session.repo.clone()),
            None => Err("Backend not initialized".to_string()),
        }
    }

    /// Current identity, `None` while startup is still in flight
    pub async fn identity(&self) -> Option<UserIdentity> {
        self.session.lock().await.as_ref().map(|s| s.identity.clone())
    }
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> PathBuf {
    let app_dir = app_handle.path().app_data_dir().unwrap();
    std::fs::create_dir_all(&app_dir).unwrap();
    app_dir.join("skylist.db")
}

/// Build the store configuration
///
/// The environment is read only here, at the outermost edge; everything
/// below receives the explicit config struct.
fn store_config(db_path: PathBuf) -> StoreConfig {
    let mut config = StoreConfig::new(db_path);
    if let Ok(app_id) = std::env::var("SKYLIST_APP_ID") {
        if !app_id.is_empty() {
            config = config.with_app_id(app_id);
        }
    }
    if let (Ok(url), Ok(token)) = (
        std::env::var("SKYLIST_SYNC_URL"),
        std::env::var("SKYLIST_AUTH_TOKEN"),
    ) {
        if !url.is_empty() && !token.is_empty() {
            config = config.with_remote(url, token);
        }
    }
    config
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle()
                .plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                    // Focus the existing window when a new instance tries to start
                    if let Some(window) = app.get_webview_window("main") {
                        let _ = window.set_focus();
                    }
                }))?;

            tracing_subscriber::fmt::init();

            let app_handle = app.handle().clone();
            let state = AppState::default();
            app.manage(state.clone());

            let config = store_config(get_db_path(&app_handle));

            // Initialize the session asynchronously so the window shows
            // immediately; the frontend waits on session-ready/init-error
            tauri::async_runtime::spawn(async move {
                start_session(app_handle, state, config).await;
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_session,
            commands::list_todos,
            commands::add_todo,
            commands::toggle_todo,
            commands::rename_todo,
            commands::delete_todo,
            commands::clear_completed,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Initialize the backend, sign in, and start the event bridges
async fn start_session(app_handle: tauri::AppHandle, state: AppState, config: StoreConfig) {
    let backend = match Backend::initialize(&config).await {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            error!(error = %e, "backend initialization failed");
            let _ = app_handle.emit("init-error", e.to_string());
            return;
        }
    };

    let identity = match sign_in(&backend.connection(), &config).await {
        Ok(identity) => identity,
        Err(e) => {
            error!(error = %e, "sign-in failed");
            let _ = app_handle.emit("init-error", e.to_string());
            return;
        }
    };

    let repo = Arc::new(TodoRepository::new(
        backend.connection(),
        CollectionScope::new(config.app_id.clone(), identity.user_id.clone()),
    ));

    // Subscribe before the session becomes visible so no snapshot is missed
    let mut stream = repo.subscribe();
    repo.publish().await;

    *state.session.lock().await = Some(ActiveSession {
        identity: identity.clone(),
        backend: backend.clone(),
        repo: repo.clone(),
    });

    info!(user_id = %identity.user_id, "session ready");
    let _ = app_handle.emit("session-ready", identity);

    // Forward live snapshots to the webview; a Listen error is terminal
    let events = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        loop {
            match stream.next().await {
                Some(Ok(todos)) => {
                    let _ = events.emit("todos-changed", todos);
                }
                Some(Err(e)) => {
                    error!(error = %e, "live query dropped");
                    let _ = events.emit("listen-error", e.to_string());
                    stream.cancel();
                    break;
                }
                None => break,
            }
        }
    });

    // Pull remote changes on an interval and republish; this is how edits
    // made by other clients of the same identity reach the UI
    if backend.is_remote() {
        let interval = config.sync_interval;
        tauri::async_runtime::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                if let Err(e) = backend.sync().await {
                    warn!(error = %e, "remote sync failed");
                    continue;
                }
                repo.publish().await;
            }
        });
    }
}
