//! Tauri Command Wrappers
//!
//! Frontend bindings to backend commands and events.

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::models::{SessionInfo, Todo};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "event"])]
    async fn listen(event: &str, handler: &js_sys::Function) -> JsValue;
}

/// Error string out of a rejected invoke promise
fn error_string(err: JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}

// ========================
// Command Argument Structs
// ========================

#[derive(Serialize)]
pub struct AddTodoArgs<'a> {
    pub text: &'a str,
}

#[derive(Serialize)]
pub struct ToggleTodoArgs<'a> {
    pub id: &'a str,
    #[serde(rename = "currentCompleted")]
    pub current_completed: bool,
}

#[derive(Serialize)]
pub struct RenameTodoArgs<'a> {
    pub id: &'a str,
    #[serde(rename = "newText")]
    pub new_text: &'a str,
    #[serde(rename = "originalText")]
    pub original_text: &'a str,
}

#[derive(Serialize)]
pub struct IdArgs<'a> {
    pub id: &'a str,
}

// ========================
// Session Commands
// ========================

pub async fn get_session() -> Result<Option<SessionInfo>, String> {
    let result = invoke("get_session", JsValue::NULL).await.map_err(error_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// ========================
// Todo Commands
// ========================

pub async fn list_todos() -> Result<Vec<Todo>, String> {
    let result = invoke("list_todos", JsValue::NULL).await.map_err(error_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn add_todo(text: &str) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&AddTodoArgs { text }).map_err(|e| e.to_string())?;
    invoke("add_todo", js_args).await.map_err(error_string)?;
    Ok(())
}

pub async fn toggle_todo(id: &str, current_completed: bool) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&ToggleTodoArgs { id, current_completed })
        .map_err(|e| e.to_string())?;
    invoke("toggle_todo", js_args).await.map_err(error_string)?;
    Ok(())
}

pub async fn rename_todo(id: &str, new_text: &str, original_text: &str) -> Result<bool, String> {
    let js_args = serde_wasm_bindgen::to_value(&RenameTodoArgs { id, new_text, original_text })
        .map_err(|e| e.to_string())?;
    let result = invoke("rename_todo", js_args).await.map_err(error_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

pub async fn delete_todo(id: &str) -> Result<(), String> {
    let js_args = serde_wasm_bindgen::to_value(&IdArgs { id }).map_err(|e| e.to_string())?;
    invoke("delete_todo", js_args).await.map_err(error_string)?;
    Ok(())
}

pub async fn clear_completed() -> Result<u64, String> {
    let result = invoke("clear_completed", JsValue::NULL).await.map_err(error_string)?;
    serde_wasm_bindgen::from_value(result).map_err(|e| e.to_string())
}

// ========================
// Event Subscription
// ========================

#[derive(serde::Deserialize)]
struct EventEnvelope<T> {
    payload: T,
}

/// A registered Tauri event listener
///
/// Released exactly once: explicitly through [`release`](Self::release) or
/// implicitly on drop.
pub struct EventSubscription {
    _closure: Closure<dyn FnMut(JsValue)>,
    unlisten: js_sys::Function,
    released: bool,
}

impl EventSubscription {
    pub fn release(&mut self) {
        if !self.released {
            self.released = true;
            let _ = self.unlisten.call0(&JsValue::NULL);
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

/// Register a handler for a backend event with a typed payload
pub async fn listen_event<T, F>(event: &str, mut handler: F) -> EventSubscription
where
    T: serde::de::DeserializeOwned + 'static,
    F: FnMut(T) + 'static,
{
    let closure = Closure::<dyn FnMut(JsValue)>::new(move |raw: JsValue| {
        match serde_wasm_bindgen::from_value::<EventEnvelope<T>>(raw) {
            Ok(envelope) => handler(envelope.payload),
            Err(e) => {
                web_sys::console::error_1(&format!("[EVENT] bad payload: {}", e).into());
            }
        }
    });

    let unlisten = listen(event, closure.as_ref().unchecked_ref()).await;
    EventSubscription {
        _closure: closure,
        unlisten: unlisten.unchecked_into::<js_sys::Function>(),
        released: false,
    }
}
