//! Todo Item Component
//!
//! One row in the list: checkbox, text with inline edit mode, delete with
//! confirmation. Completed rows are not editable.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::components::ConfirmModal;
use crate::context::AppContext;
use crate::models::Todo;

/// A single todo row
#[component]
pub fn TodoItem(todo: Todo) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let id = todo.id;
    let original_text = todo.text;
    let completed = todo.completed;

    let (editing, set_editing) = signal(false);
    let (edit_text, set_edit_text) = signal(original_text.clone());
    let (updating, set_updating) = signal(false);
    let (deleting, set_deleting) = signal(false);
    let (show_delete_modal, set_show_delete_modal) = signal(false);

    let toggle = {
        let id = id.clone();
        move |_| {
            // Per-item re-entry guard
            if updating.get() {
                return;
            }
            set_updating.set(true);
            let id = id.clone();
            spawn_local(async move {
                if let Err(e) = commands::toggle_todo(&id, completed).await {
                    web_sys::console::error_1(&format!("[ITEM] toggle failed: {}", e).into());
                    ctx.report_error("Failed to update the task status. Please try again.");
                }
                set_updating.set(false);
            });
        }
    };

    let save_edit = {
        let id = id.clone();
        let original = original_text.clone();
        move || {
            if updating.get() {
                return;
            }
            let new_text = edit_text.get();
            // Blank input reverts, unchanged input just leaves edit mode;
            // the repository enforces the same rules before writing
            if new_text.trim().is_empty() {
                set_edit_text.set(original.clone());
                set_editing.set(false);
                return;
            }
            if new_text.trim() == original {
                set_editing.set(false);
                return;
            }
            set_updating.set(true);
            let id = id.clone();
            let original = original.clone();
            spawn_local(async move {
                match commands::rename_todo(&id, &new_text, &original).await {
                    Ok(_) => set_editing.set(false),
                    Err(e) => {
                        web_sys::console::error_1(&format!("[ITEM] rename failed: {}", e).into());
                        ctx.report_error("Failed to update the task text. Please try again.");
                    }
                }
                set_updating.set(false);
            });
        }
    };
    let save_on_blur = save_edit.clone();
    let save_on_enter = save_edit.clone();

    let confirm_delete = {
        let id = id.clone();
        Callback::new(move |_: ()| {
            if deleting.get() {
                return;
            }
            set_deleting.set(true);
            let id = id.clone();
            spawn_local(async move {
                match commands::delete_todo(&id).await {
                    Ok(()) => set_show_delete_modal.set(false),
                    Err(e) => {
                        web_sys::console::error_1(&format!("[ITEM] delete failed: {}", e).into());
                        ctx.report_error("Failed to delete the task. Please try again.");
                    }
                }
                set_deleting.set(false);
            });
        })
    };

    let display_text = original_text.clone();
    let edit_seed = original_text.clone();
    let escape_seed = original_text.clone();
    let edit_btn_seed = original_text.clone();

    view! {
        <div class=move || if completed { "todo-row completed" } else { "todo-row" }>
            <input
                type="checkbox"
                prop:checked=completed
                prop:disabled=move || updating.get()
                on:change=toggle
            />

            <Show when=move || !editing.get()>
                {
                    let text = display_text.clone();
                    let seed = edit_seed.clone();
                    view! {
                        <span
                            class="todo-text"
                            on:dblclick=move |_| {
                                // Completed tasks are not editable
                                if !completed {
                                    set_edit_text.set(seed.clone());
                                    set_editing.set(true);
                                }
                            }
                        >
                            {text}
                        </span>
                    }
                }
            </Show>

            <Show when=move || editing.get()>
                {
                    let on_blur = save_on_blur.clone();
                    let on_enter = save_on_enter.clone();
                    let revert = escape_seed.clone();
                    view! {
                        <input
                            class="todo-edit"
                            type="text"
                            autofocus
                            prop:value=move || edit_text.get()
                            prop:disabled=move || updating.get()
                            on:input=move |ev| {
                                let target = ev.target().unwrap();
                                let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                                set_edit_text.set(input.value());
                            }
                            on:blur=move |_| on_blur()
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                match ev.key().as_str() {
                                    "Enter" => {
                                        ev.prevent_default();
                                        on_enter();
                                    }
                                    "Escape" => {
                                        set_edit_text.set(revert.clone());
                                        set_editing.set(false);
                                    }
                                    _ => {}
                                }
                            }
                        />
                    }
                }
            </Show>

            <div class="todo-actions">
                <Show when=move || !editing.get() && !completed>
                    {
                        let seed = edit_btn_seed.clone();
                        view! {
                            <button
                                class="edit-btn"
                                title="Edit task"
                                on:click=move |_| {
                                    set_edit_text.set(seed.clone());
                                    set_editing.set(true);
                                }
                            >
                                "✎"
                            </button>
                        }
                    }
                </Show>
                <button
                    class="delete-btn"
                    title="Delete task"
                    on:click=move |_| set_show_delete_modal.set(true)
                >
                    "×"
                </button>
            </div>

            <ConfirmModal
                open=show_delete_modal
                title="Delete task?"
                message="This task will be permanently removed. This cannot be undone."
                confirm_text="Delete"
                processing=deleting
                on_confirm=confirm_delete
                on_cancel=Callback::new(move |_| set_show_delete_modal.set(false))
            />
        </div>
    }
}
