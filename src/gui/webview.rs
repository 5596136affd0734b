//! Wry webview child of the winit window.
//!
//! Creates a [`wry::WebView`] positioned at the right edge of the window,
//! loads the glint-ui WASM bundle via a custom `glint://` protocol, and
//! bridges IPC between the Dioxus web app and the native engine.

use std::borrow::Cow;
use std::sync::mpsc;

use rust_embed::RustEmbed;
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{dpi, Rect, WebView, WebViewBuilder};

use crate::options::Options;

/// Embedded glint-ui dist output (built by `cargo xtask build-ui`).
#[derive(RustEmbed)]
#[folder = "crates/glint-ui/dist/"]
struct UiAssets;

/// Default width of the options panel in physical pixels.
pub const PANEL_WIDTH: u32 = 350;

/// Actions sent from the webview WASM app to the native engine.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Set a single option field: `options[section][field] = value`.
    SetOption {
        /// Top-level section key (e.g. `"mini_sphere"`).
        path: String,
        /// Field key within the section (e.g. `"x"`).
        field: String,
        /// New JSON value.
        value: serde_json::Value,
    },
    /// Replace all options with a named preset.
    LoadPreset {
        /// Preset name (e.g. `"drift"`).
        name: String,
    },
    /// Return the camera to its configured position.
    ResetCamera,
    /// Pin or unpin the panel.
    TogglePanel,
    /// The user dragged the panel edge.
    ResizePanel {
        /// Requested width in physical pixels.
        width: u32,
    },
}

/// Create the wry webview as a child of the given window.
///
/// Returns `(webview, action_rx)`; the receiver yields [`UiAction`]s
/// from the WASM app.
///
/// # Errors
///
/// Returns [`wry::Error`] if the platform webview cannot be created.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    window_width: u32,
    window_height: u32,
    panel_width: u32,
) -> Result<(WebView, mpsc::Receiver<UiAction>), wry::Error> {
    let (tx, rx) = mpsc::channel();

    let bounds = panel_bounds(window_width, window_height, panel_width);

    let webview = WebViewBuilder::new()
        .with_bounds(bounds)
        .with_custom_protocol("glint".into(), |_id, request| {
            let path = request.uri().path();
            let path = if path == "/" { "index.html" } else { &path[1..] };

            match UiAssets::get(path) {
                Some(asset) => {
                    let mime = mime_guess::from_path(path)
                        .first_or_octet_stream()
                        .to_string();
                    Response::builder()
                        .header(CONTENT_TYPE, mime)
                        .body(Cow::from(asset.data.to_vec()))
                        .unwrap_or_else(|_| {
                            Response::new(Cow::from(Vec::new()))
                        })
                }
                None => Response::builder()
                    .status(404)
                    .body(Cow::from(Vec::new()))
                    .unwrap_or_else(|_| Response::new(Cow::from(Vec::new()))),
            }
        })
        .with_url("glint://localhost/")
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |req| {
            let body = req.body();
            if let Ok(msg) = serde_json::from_str::<serde_json::Value>(body) {
                if let Some(action) = parse_action(&msg) {
                    let _ = tx.send(action);
                } else {
                    log::warn!("ignoring unrecognized panel message: {body}");
                }
            }
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

/// [`Rect`] for a panel docked to the right edge of the window.
#[must_use]
pub fn panel_bounds(window_width: u32, window_height: u32, panel_width: u32) -> Rect {
    let width = panel_width.min(window_width);
    let x = window_width - width;
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32, 0,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(width, window_height)),
    }
}

/// [`Rect`] for an unpinned panel floating `margin` pixels inside the
/// right edge.
#[must_use]
pub fn panel_bounds_floating(
    window_width: u32,
    window_height: u32,
    panel_width: u32,
    margin: u32,
) -> Rect {
    let width = panel_width.min(window_width.saturating_sub(2 * margin));
    let x = window_width.saturating_sub(width + margin);
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            x as i32,
            margin as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(
            width,
            window_height.saturating_sub(2 * margin),
        )),
    }
}

fn escape_for_script(json: &str) -> String {
    json.replace('\\', "\\\\").replace('\'', "\\'")
}

/// Push the Options JSON schema to the webview (call once after creation).
pub fn push_schema(webview: &WebView, options: &Options) {
    let json = serde_json::to_string(&Options::json_schema()).unwrap_or_default();
    let _ = webview.evaluate_script(&format!(
        "window.__glint_push_schema('{}')",
        escape_for_script(&json)
    ));

    push_options(webview, options);
}

/// Push the current Options state to the webview.
pub fn push_options(webview: &WebView, options: &Options) {
    let json = serde_json::to_string(options).unwrap_or_default();
    let _ = webview.evaluate_script(&format!(
        "window.__glint_push_options('{}')",
        escape_for_script(&json)
    ));
}

/// Tell the panel whether it is pinned.
pub fn push_panel_pinned(webview: &WebView, pinned: bool) {
    let _ = webview
        .evaluate_script(&format!("window.__glint_push_pinned({pinned})"));
}

/// Push the names for the preset picker and the one currently applied.
pub fn push_presets(webview: &WebView, names: &[String], active: Option<&str>) {
    let _ = webview.evaluate_script(&format!(
        "window.__glint_push_presets('{}')",
        escape_for_script(&presets_json(names, active))
    ));
}

fn presets_json(names: &[String], active: Option<&str>) -> String {
    serde_json::json!({ "names": names, "active": active }).to_string()
}

/// Push the FPS readout.
pub fn push_stats(webview: &WebView, fps: f32) {
    let _ = webview.evaluate_script(&format!(
        "window.__glint_push_stats('{{\"fps\":{fps:.1}}}')"
    ));
}

// ── Internals ────────────────────────────────────────────────────────────

/// JavaScript injected before page load. Defines the bridge functions that
/// the Dioxus WASM code calls, and dispatches `CustomEvent`s.
///
/// Calls that arrive before the WASM app has registered listeners are
/// buffered. When a listener attaches it replays any pending data.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = { schema: null, options: null, pinned: null, presets: null };

    function dispatch(name, detail) {
        window.dispatchEvent(new CustomEvent(name, { detail: detail }));
    }

    window.__glint_push_schema = function(json) {
        pending.schema = json;
        dispatch('glint-schema', json);
    };
    window.__glint_push_options = function(json) {
        pending.options = json;
        dispatch('glint-options', json);
    };
    window.__glint_push_pinned = function(pinned) {
        pending.pinned = String(pinned);
        dispatch('glint-pinned', pending.pinned);
    };
    window.__glint_push_presets = function(json) {
        pending.presets = json;
        dispatch('glint-presets', json);
    };
    window.__glint_push_stats = function(json) {
        dispatch('glint-stats', json);
    };

    var origAdd = EventTarget.prototype.addEventListener;
    EventTarget.prototype.addEventListener = function(type, fn, opts) {
        origAdd.call(this, type, fn, opts);
        if (this !== window) { return; }
        if (type === 'glint-schema' && pending.schema) {
            dispatch('glint-schema', pending.schema);
        }
        if (type === 'glint-options' && pending.options) {
            dispatch('glint-options', pending.options);
        }
        if (type === 'glint-pinned' && pending.pinned) {
            dispatch('glint-pinned', pending.pinned);
        }
        if (type === 'glint-presets' && pending.presets) {
            dispatch('glint-presets', pending.presets);
        }
    };
})();
"#;

/// Parse an IPC message from the WASM side into a [`UiAction`].
fn parse_action(msg: &serde_json::Value) -> Option<UiAction> {
    let action = msg.get("action")?.as_str()?;
    match action {
        "set_option" => {
            let path = msg.get("path")?.as_str()?.to_owned();
            let field = msg.get("field")?.as_str()?.to_owned();
            let value = msg.get("value")?.clone();
            Some(UiAction::SetOption { path, field, value })
        }
        "load_preset" => {
            let name = msg.get("name")?.as_str()?.to_owned();
            Some(UiAction::LoadPreset { name })
        }
        "reset_camera" => Some(UiAction::ResetCamera),
        "toggle_panel" => Some(UiAction::TogglePanel),
        "resize_panel" => {
            let width = msg.get("width")?.as_u64()?;
            Some(UiAction::ResizePanel {
                width: u32::try_from(width).ok()?,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_set_option() {
        let msg = json!({
            "action": "set_option",
            "path": "mini_sphere",
            "field": "x",
            "value": 1.25,
        });
        assert_eq!(
            parse_action(&msg),
            Some(UiAction::SetOption {
                path: "mini_sphere".into(),
                field: "x".into(),
                value: json!(1.25),
            })
        );
    }

    #[test]
    fn parses_panel_and_camera_actions() {
        assert_eq!(
            parse_action(&json!({ "action": "reset_camera" })),
            Some(UiAction::ResetCamera)
        );
        assert_eq!(
            parse_action(&json!({ "action": "toggle_panel" })),
            Some(UiAction::TogglePanel)
        );
        assert_eq!(
            parse_action(&json!({ "action": "resize_panel", "width": 420 })),
            Some(UiAction::ResizePanel { width: 420 })
        );
        assert_eq!(
            parse_action(&json!({ "action": "load_preset", "name": "drift" })),
            Some(UiAction::LoadPreset {
                name: "drift".into()
            })
        );
    }

    #[test]
    fn rejects_malformed_messages() {
        assert_eq!(parse_action(&json!({ "action": "load_file" })), None);
        assert_eq!(parse_action(&json!({ "action": "set_option" })), None);
        assert_eq!(
            parse_action(&json!({ "action": "resize_panel", "width": -3 })),
            None
        );
        assert_eq!(parse_action(&json!({ "path": "camera" })), None);
    }

    #[test]
    fn presets_payload_carries_active_name() {
        let names = vec!["classic".to_owned(), "mine".to_owned()];
        let payload: serde_json::Value =
            serde_json::from_str(&presets_json(&names, Some("mine"))).unwrap();
        assert_eq!(payload, json!({ "names": ["classic", "mine"], "active": "mine" }));

        let payload: serde_json::Value =
            serde_json::from_str(&presets_json(&names, None)).unwrap();
        assert_eq!(payload["active"], serde_json::Value::Null);
    }

    #[test]
    fn docked_bounds_clamp_to_window() {
        let rect = panel_bounds(300, 600, PANEL_WIDTH);
        assert_eq!(
            rect.size,
            dpi::Size::Physical(dpi::PhysicalSize::new(300, 600))
        );
        assert_eq!(
            rect.position,
            dpi::Position::Physical(dpi::PhysicalPosition::new(0, 0))
        );
    }

    #[test]
    fn floating_bounds_leave_margin() {
        let rect = panel_bounds_floating(1000, 800, 350, 10);
        assert_eq!(
            rect.position,
            dpi::Position::Physical(dpi::PhysicalPosition::new(640, 10))
        );
        assert_eq!(
            rect.size,
            dpi::Size::Physical(dpi::PhysicalSize::new(350, 780))
        );
    }
}
