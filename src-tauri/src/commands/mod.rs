//! Command Handlers
//!
//! IPC surface exposed to the frontend.

mod session_cmd;
mod todo_cmd;

pub use session_cmd::get_session;
pub use todo_cmd::{add_todo, clear_completed, delete_todo, list_todos, rename_todo, toggle_todo};
