//! Application Context
//!
//! Shared state provided via Leptos Context API. All backend failures funnel
//! into one of two banners: fatal (initialization/subscription) or
//! dismissible (failed writes).

use leptos::prelude::*;

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Dismissible write-error message - read
    pub error: ReadSignal<Option<String>>,
    /// Dismissible write-error message - write
    set_error: WriteSignal<Option<String>>,
    /// Fatal error message, shown until reload - read
    pub fatal_error: ReadSignal<Option<String>>,
    /// Fatal error message - write
    set_fatal_error: WriteSignal<Option<String>>,
    /// Signed-in user id - read
    pub user_id: ReadSignal<Option<String>>,
}

impl AppContext {
    pub fn new(
        error: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        fatal_error: (ReadSignal<Option<String>>, WriteSignal<Option<String>>),
        user_id: ReadSignal<Option<String>>,
    ) -> Self {
        Self {
            error: error.0,
            set_error: error.1,
            fatal_error: fatal_error.0,
            set_fatal_error: fatal_error.1,
            user_id,
        }
    }

    /// Surface a non-fatal error in the dismissible banner
    pub fn report_error(&self, message: &str) {
        self.set_error.set(Some(message.to_string()));
    }

    /// Dismiss the non-fatal banner
    pub fn clear_error(&self) {
        self.set_error.set(None);
    }

    /// Surface a fatal error; there is no dismissing or retrying these
    pub fn set_fatal(&self, message: &str) {
        self.set_fatal_error.set(Some(message.to_string()));
    }
}
