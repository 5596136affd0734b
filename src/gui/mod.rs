//! Native-side GUI layer: wry webview hosting the glint-ui WASM bundle.
//!
//! The webview is created as a child of the winit window and communicates
//! with the engine via a minimal JSON IPC bridge.

/// Panel state (pinned/peek/width) and per-frame IPC draining.
pub(crate) mod panel;
/// Wry webview creation, IPC handler, and state push helpers.
pub mod webview;
