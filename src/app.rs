//! Skylist Frontend App
//!
//! Root component: starts the session, subscribes to live snapshots, and
//! renders the form/list. The snapshot events are the single source of truth
//! for list contents; no optimistic updates happen here.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::{self, EventSubscription};
use crate::components::{ErrorBanner, TodoForm, TodoList};
use crate::context::AppContext;
use crate::models::{SessionInfo, Todo};

#[component]
pub fn App() -> impl IntoView {
    // State
    let (todos, set_todos) = signal(Vec::<Todo>::new());
    let (loading, set_loading) = signal(true);
    let (user_id, set_user_id) = signal::<Option<String>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let (fatal_error, set_fatal_error) = signal::<Option<String>>(None);

    // Provide context to all children
    let ctx = AppContext::new((error, set_error), (fatal_error, set_fatal_error), user_id);
    provide_context(ctx);

    // Event listener handles, released exactly once on teardown
    let subscriptions = StoredValue::new_local(Vec::<EventSubscription>::new());

    Effect::new(move |_| {
        spawn_local(async move {
            let mut subs = Vec::new();

            // Live query snapshots: the full ordered list on every change
            subs.push(
                commands::listen_event::<Vec<Todo>, _>("todos-changed", move |list| {
                    web_sys::console::log_1(
                        &format!("[APP] snapshot with {} todos", list.len()).into(),
                    );
                    set_todos.set(list);
                    set_loading.set(false);
                })
                .await,
            );

            subs.push(
                commands::listen_event::<SessionInfo, _>("session-ready", move |session| {
                    set_user_id.set(Some(session.user_id));
                })
                .await,
            );

            subs.push(
                commands::listen_event::<String, _>("init-error", move |msg| {
                    web_sys::console::error_1(&format!("[APP] init error: {}", msg).into());
                    set_fatal_error.set(Some(
                        "Failed to initialize the application. Please try again later."
                            .to_string(),
                    ));
                    set_loading.set(false);
                })
                .await,
            );

            subs.push(
                commands::listen_event::<String, _>("listen-error", move |msg| {
                    web_sys::console::error_1(&format!("[APP] listen error: {}", msg).into());
                    set_fatal_error.set(Some(
                        "Failed to load your tasks. Please try again later.".to_string(),
                    ));
                    set_loading.set(false);
                })
                .await,
            );

            subscriptions.update_value(|s| s.extend(subs));

            // The session may have become ready before the listeners existed
            match commands::get_session().await {
                Ok(Some(session)) => {
                    set_user_id.set(Some(session.user_id));
                    match commands::list_todos().await {
                        Ok(list) => {
                            set_todos.set(list);
                            set_loading.set(false);
                        }
                        // Local stores get no later snapshot event to recover
                        // from, so a failed first pull is fatal
                        Err(e) => {
                            web_sys::console::error_1(
                                &format!("[APP] initial list failed: {}", e).into(),
                            );
                            set_fatal_error.set(Some(
                                "Failed to load your tasks. Please try again later.".to_string(),
                            ));
                            set_loading.set(false);
                        }
                    }
                }
                // Still initializing; the events above will arrive
                Ok(None) => {}
                Err(e) => {
                    web_sys::console::error_1(&format!("[APP] get_session failed: {}", e).into());
                    set_fatal_error.set(Some(
                        "Failed to initialize the application. Please try again later."
                            .to_string(),
                    ));
                    set_loading.set(false);
                }
            }
        });
    });

    on_cleanup(move || {
        subscriptions.update_value(|subs| {
            for sub in subs.iter_mut() {
                sub.release();
            }
            subs.clear();
        });
    });

    view! {
        <div class="app-shell">
            <header class="app-header">
                <h1>"Skylist"</h1>
                {move || user_id.get().map(|uid| view! {
                    <p class="user-id">"User: " <code>{uid}</code></p>
                })}
            </header>

            <main class="app-main">
                <Show when=move || loading.get()>
                    <div class="spinner" aria-label="Loading"></div>
                </Show>

                <Show when=move || !loading.get() && fatal_error.get().is_none()>
                    <TodoForm />
                    <TodoList todos=todos />
                </Show>
            </main>

            <ErrorBanner />
        </div>
    }
}
