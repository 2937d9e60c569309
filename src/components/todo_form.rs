//! Todo Form Component
//!
//! Form for adding new tasks.

use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::JsCast;

use crate::commands;
use crate::context::AppContext;

/// Form for creating new todos
#[component]
pub fn TodoForm() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let (text, set_text) = signal(String::new());
    let (submitting, set_submitting) = signal(false);

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let value = text.get();
        if value.trim().is_empty() {
            return;
        }
        // One write at a time; a second submit while pending is ignored
        if submitting.get() {
            return;
        }
        set_submitting.set(true);

        spawn_local(async move {
            match commands::add_todo(&value).await {
                Ok(()) => set_text.set(String::new()),
                Err(e) => {
                    web_sys::console::error_1(&format!("[FORM] add failed: {}", e).into());
                    ctx.report_error("Failed to add the task. Please try again.");
                }
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="todo-form" on:submit=submit>
            <input
                type="text"
                placeholder="Add a new task..."
                prop:value=move || text.get()
                prop:disabled=move || submitting.get()
                on:input=move |ev| {
                    let target = ev.target().unwrap();
                    let input = target.dyn_ref::<web_sys::HtmlInputElement>().unwrap();
                    set_text.set(input.value());
                }
            />
            <button type="submit" prop:disabled=move || submitting.get()>
                {move || if submitting.get() { "…" } else { "Add" }}
            </button>
        </form>
    }
}
