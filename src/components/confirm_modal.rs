//! Confirm Modal Component
//!
//! Blocking confirmation dialog used before destructive actions.

use leptos::prelude::*;

/// Confirmation modal with confirm/cancel actions
///
/// # Arguments
/// * `open` - whether the modal is visible
/// * `processing` - disables both buttons while the action is in flight
/// * `on_confirm` / `on_cancel` - callbacks for the two buttons
#[component]
pub fn ConfirmModal(
    open: ReadSignal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] message: String,
    #[prop(into)] confirm_text: String,
    processing: ReadSignal<bool>,
    #[prop(into)] on_confirm: Callback<()>,
    #[prop(into)] on_cancel: Callback<()>,
) -> impl IntoView {
    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <div class="modal">
                    <h3>{title.clone()}</h3>
                    <p>{message.clone()}</p>
                    <div class="modal-actions">
                        <button
                            class="cancel-btn"
                            prop:disabled=move || processing.get()
                            on:click=move |_| on_cancel.run(())
                        >
                            "Cancel"
                        </button>
                        <button
                            class="confirm-btn danger"
                            prop:disabled=move || processing.get()
                            on:click=move |_| on_confirm.run(())
                        >
                            {
                                let label = confirm_text.clone();
                                move || if processing.get() { "…".to_string() } else { label.clone() }
                            }
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
