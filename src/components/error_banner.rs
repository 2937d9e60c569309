//! Error Banner Component
//!
//! Two variants driven by AppContext: a persistent banner for fatal
//! initialization/subscription failures, and a dismissible one for failed
//! writes. Retrying is always manual.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn ErrorBanner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <Show when=move || ctx.fatal_error.get().is_some()>
            <div class="error-banner fatal">
                <span>{move || ctx.fatal_error.get().unwrap_or_default()}</span>
            </div>
        </Show>
        <Show when=move || ctx.error.get().is_some()>
            <div class="error-banner">
                <span>{move || ctx.error.get().unwrap_or_default()}</span>
                <button class="dismiss-btn" on:click=move |_| ctx.clear_error()>"×"</button>
            </div>
        </Show>
    }
}
