//! UI Components
//!
//! Reusable Leptos components.

mod confirm_modal;
mod error_banner;
mod todo_form;
mod todo_item;
mod todo_list;

pub use confirm_modal::ConfirmModal;
pub use error_banner::ErrorBanner;
pub use todo_form::TodoForm;
pub use todo_item::TodoItem;
pub use todo_list::TodoList;
