//! Todo List Component
//!
//! The list body plus the clear-completed bulk action.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::{ConfirmModal, TodoItem};
use crate::context::AppContext;
use crate::models::Todo;

/// List of todos with header counts and the bulk clear action
#[component]
pub fn TodoList(todos: ReadSignal<Vec<Todo>>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (show_clear_modal, set_show_clear_modal) = signal(false);
    let (clearing, set_clearing) = signal(false);

    let completed_count = move || todos.get().iter().filter(|t| t.completed).count();

    let confirm_clear = Callback::new(move |_: ()| {
        if clearing.get() {
            return;
        }
        set_clearing.set(true);
        spawn_local(async move {
            match commands::clear_completed().await {
                Ok(removed) => {
                    web_sys::console::log_1(
                        &format!("[LIST] cleared {} completed todos", removed).into(),
                    );
                    set_show_clear_modal.set(false);
                }
                Err(e) => {
                    web_sys::console::error_1(&format!("[LIST] clear failed: {}", e).into());
                    ctx.report_error("Failed to clear completed tasks. Please try again.");
                }
            }
            set_clearing.set(false);
        });
    });

    view! {
        <div class="todo-list">
            <div class="list-header">
                <h2>"Your Tasks " <span class="count">"(" {move || todos.get().len()} ")"</span></h2>
                <Show when=move || { completed_count() > 0 }>
                    <button
                        class="clear-completed-btn"
                        on:click=move |_| set_show_clear_modal.set(true)
                    >
                        "Clear completed (" {completed_count} ")"
                    </button>
                </Show>
            </div>

            <Show when=move || todos.get().is_empty()>
                <p class="empty-state">"No tasks yet. Add one above!"</p>
            </Show>

            <For
                each=move || todos.get()
                key=|todo| {
                    // Key on the mutable fields too so edits re-render the row
                    (todo.id.clone(), todo.text.clone(), todo.completed)
                }
                children=move |todo| view! { <TodoItem todo=todo /> }
            />

            <ConfirmModal
                open=show_clear_modal
                title="Clear completed tasks?"
                message="All completed tasks will be permanently removed. This cannot be undone."
                confirm_text="Clear"
                processing=clearing
                on_confirm=confirm_clear
                on_cancel=Callback::new(move |_| set_show_clear_modal.set(false))
            />
        </div>
    }
}
