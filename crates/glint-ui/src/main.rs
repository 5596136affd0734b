//! Dioxus web app for the glint options panel.
//!
//! Compiled to WASM and loaded into a wry webview by the native demo.
//! Communicates with the engine via a JSON IPC bridge.

// `rsx!` expansion trips `unused_qualifications` on event-handler attributes.
#![allow(unused_qualifications)]

mod bridge;
mod schema_ui;

use dioxus::prelude::*;
use serde_json::Value;

/// Initial panel width; matches the native default.
const PANEL_WIDTH: u32 = 350;
/// Width change per click of the resize buttons.
const WIDTH_STEP: u32 = 50;

fn main() {
    dioxus::launch(app);
}

fn app() -> Element {
    let schema: Signal<Option<Value>> = use_signal(|| None);
    let options: Signal<Option<Value>> = use_signal(|| None);
    let stats: Signal<Option<Value>> = use_signal(|| None);
    let presets: Signal<Option<Value>> = use_signal(|| None);
    let pinned: Signal<bool> = use_signal(|| true);

    // Register IPC listeners once on mount.
    let _ = use_effect(move || {
        bridge::register_listeners(schema, options, stats, presets, pinned);
    });

    let schema_val = schema.read();
    let options_val = options.read();

    match (&*schema_val, &*options_val) {
        (Some(s), Some(o)) => rsx! {
            div { class: "side-panel",
                Header { pinned, presets }
                schema_ui::SchemaPanel {
                    schema: s.clone(),
                    options: o.clone(),
                    stats_sig: stats,
                }
            }
        },
        _ => rsx! {
            div {
                style: "padding: 16px; color: #585b70;",
                "Waiting for engine..."
            }
        },
    }
}

/// Preset names and the active one from a `glint-presets` payload.
fn preset_choices(payload: Option<&Value>) -> (Vec<String>, Option<String>) {
    let Some(payload) = payload else {
        return (Vec::new(), None);
    };
    let names = payload
        .get("names")
        .and_then(Value::as_array)
        .map(|names| {
            names
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();
    let active = payload
        .get("active")
        .and_then(Value::as_str)
        .map(str::to_owned);
    (names, active)
}

/// Title row: preset picker, camera reset, and pin toggle.
#[component]
fn Header(pinned: Signal<bool>, presets: Signal<Option<Value>>) -> Element {
    let (names, active) = preset_choices(presets.read().as_ref());
    let pin_label = if pinned() { "Unpin" } else { "Pin" };
    // The native side clamps, so this only tracks what was requested.
    let mut width = use_signal(|| PANEL_WIDTH);
    let mut resize = move |grow: bool| {
        let next = if grow {
            width() + WIDTH_STEP
        } else {
            width().saturating_sub(WIDTH_STEP)
        };
        width.set(next);
        bridge::send_resize_panel(next);
    };
    rsx! {
        div { class: "panel-header",
            span { class: "title", "glint" }
            select {
                onchange: move |evt: Event<FormData>| {
                    let name = evt.value();
                    if !name.is_empty() {
                        bridge::send_load_preset(&name);
                    }
                },
                option { value: "", selected: active.is_none(), "Preset…" }
                for name in names {
                    option {
                        value: "{name}",
                        selected: active.as_deref() == Some(name.as_str()),
                        "{name}"
                    }
                }
            }
            button {
                onclick: move |_| bridge::send_reset_camera(),
                "Reset camera"
            }
            button { onclick: move |_| resize(true), "+" }
            button { onclick: move |_| resize(false), "−" }
            button {
                onclick: move |_| bridge::send_toggle_panel(),
                "{pin_label}"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn preset_choices_read_names_and_active() {
        let payload = json!({ "names": ["classic", "drift", "mine"], "active": "drift" });
        let (names, active) = preset_choices(Some(&payload));
        assert_eq!(names, ["classic", "drift", "mine"]);
        assert_eq!(active.as_deref(), Some("drift"));
    }

    #[test]
    fn preset_choices_tolerate_missing_payload() {
        assert_eq!(preset_choices(None), (Vec::new(), None));
        let (names, active) = preset_choices(Some(&json!({ "active": null })));
        assert!(names.is_empty());
        assert_eq!(active, None);
    }
}
