//! IPC bridge between the wry webview (native) and the Dioxus WASM app.
//!
//! **Inbound** (native → WASM): the native side calls the
//! `window.__glint_push_*` functions, which dispatch `glint-*`
//! `CustomEvent`s that we listen to here.
//!
//! **Outbound** (WASM → native): we call `window.ipc.postMessage(json)` to
//! send actions back to the engine.

use dioxus::signals::{Signal, Writable};
use serde_json::Value;
use wasm_bindgen::prelude::*;

// ── Inbound listeners ────────────────────────────────────────────────────

/// Attach a window listener for `event` that receives the string detail.
fn listen(event: &str, mut handler: impl FnMut(String) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let closure = Closure::<dyn FnMut(web_sys::CustomEvent)>::new(
        move |evt: web_sys::CustomEvent| {
            if let Some(detail) = evt.detail().as_string() {
                handler(detail);
            }
        },
    );
    if window
        .add_event_listener_with_callback(
            event,
            closure.as_ref().unchecked_ref(),
        )
        .is_ok()
    {
        closure.forget();
    }
}

/// Parse a JSON detail into `sig`, ignoring malformed payloads.
fn listen_json(event: &str, mut sig: Signal<Option<Value>>) {
    listen(event, move |json| {
        if let Ok(val) = serde_json::from_str::<Value>(&json) {
            sig.set(Some(val));
        }
    });
}

/// Register every inbound listener. Call once at app startup.
pub fn register_listeners(
    schema_sig: Signal<Option<Value>>,
    options_sig: Signal<Option<Value>>,
    stats_sig: Signal<Option<Value>>,
    presets_sig: Signal<Option<Value>>,
    mut pinned_sig: Signal<bool>,
) {
    listen_json("glint-schema", schema_sig);
    listen_json("glint-options", options_sig);
    listen_json("glint-stats", stats_sig);
    listen_json("glint-presets", presets_sig);
    listen("glint-pinned", move |value| pinned_sig.set(value == "true"));
}

// ── Outbound actions ─────────────────────────────────────────────────────

/// Send a `set_option` action to the native engine.
pub fn send_set_option(path: &str, field: &str, value: &Value) {
    post_message(&serde_json::json!({
        "action": "set_option",
        "path": path,
        "field": field,
        "value": value,
    }));
}

/// Ask the engine to load a preset by name.
pub fn send_load_preset(name: &str) {
    post_message(&serde_json::json!({
        "action": "load_preset",
        "name": name,
    }));
}

/// Ask the engine to return the camera to its configured position.
pub fn send_reset_camera() {
    post_message(&serde_json::json!({ "action": "reset_camera" }));
}

/// Pin or unpin the panel.
pub fn send_toggle_panel() {
    post_message(&serde_json::json!({ "action": "toggle_panel" }));
}

/// Request a new panel width in physical pixels.
pub fn send_resize_panel(width: u32) {
    post_message(&serde_json::json!({
        "action": "resize_panel",
        "width": width,
    }));
}

/// Call `window.ipc.postMessage(json)` on the wry IPC handler.
fn post_message(msg: &Value) {
    let json = msg.to_string();
    let js = format!(
        "window.ipc.postMessage('{}')",
        json.replace('\\', "\\\\").replace('\'', "\\'")
    );
    let _ = js_sys::eval(&js);
}
