//! Browser entry point: logging setup, canvas lookup, and viewer start.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::error::GlintError;
use crate::options::Options;
use crate::viewer::{Viewer, DEFAULT_CANVAS_SELECTOR};

/// Find the canvas matching a CSS `selector`.
///
/// # Errors
///
/// Returns [`GlintError::MissingCanvas`] if no element matches or the
/// match is not a `<canvas>`.
pub fn find_canvas(selector: &str) -> Result<HtmlCanvasElement, GlintError> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|doc| doc.query_selector(selector).ok().flatten())
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| GlintError::MissingCanvas(selector.to_owned()))
}

/// CSS size of the canvas, falling back to the browser window size when
/// the canvas has not been laid out yet.
pub fn canvas_client_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
    let (w, h) = (canvas.client_width(), canvas.client_height());
    if w > 0 && h > 0 {
        return (w as u32, h as u32);
    }
    let window_dim = |v: Result<JsValue, JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    web_sys::window().map_or((1, 1), |window| {
        (
            window_dim(window.inner_width()),
            window_dim(window.inner_height()),
        )
    })
}

/// Module start: install the panic hook and console logger, then run the
/// demo in the `.webgl` canvas with the built-in `classic` preset.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"glint: logger already initialized".into());
    }

    let options = Options::builtin_preset("classic").unwrap_or_default();
    let result = Viewer::builder()
        .with_options(options)
        .with_canvas_selector(DEFAULT_CANVAS_SELECTOR)
        .build()
        .run();
    if let Err(e) = result {
        log::error!("glint failed to start: {e}");
    }
}
