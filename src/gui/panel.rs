//! GUI panel controller: owns the wry webview and its layout state.
//!
//! The panel is either docked to the right edge, hidden off-screen, or
//! floating over the scene while the pointer hovers the right edge.

use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use winit::window::Window;
use wry::dpi;

use super::webview::{self, UiAction};
use crate::options::{Options, PRESETS_DIR};
use crate::GlintEngine;

/// Gap around the floating panel.
const FLOAT_MARGIN: u32 = 10;
/// Pointer distance from the right edge that reveals a hidden panel.
const EDGE_ZONE: f32 = 6.0;
/// Allowed panel widths for drag-resize.
const WIDTH_RANGE: (u32, u32) = (220, 700);
/// Interval between FPS pushes.
const STATS_INTERVAL: Duration = Duration::from_millis(250);

/// Where the panel currently sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visibility {
    Docked,
    Hidden,
    Floating,
}

impl Visibility {
    fn pinned(self) -> bool {
        self == Self::Docked
    }

    /// Hover transition for an unpinned panel: the right edge reveals it,
    /// and it stays up while the pointer is over it.
    fn after_pointer(self, x: f32, window_width: u32, panel_width: u32) -> Self {
        if self.pinned() {
            return self;
        }
        let right = window_width as f32;
        let near_edge = x >= right - EDGE_ZONE;
        let over_panel = x >= right - (panel_width + FLOAT_MARGIN) as f32;
        if near_edge || (self == Self::Floating && over_panel) {
            Self::Floating
        } else {
            Self::Hidden
        }
    }

    fn bounds(self, window: (u32, u32), panel_width: u32) -> wry::Rect {
        let (w, h) = window;
        match self {
            Self::Docked => webview::panel_bounds(w, h, panel_width),
            Self::Floating => {
                webview::panel_bounds_floating(w, h, panel_width, FLOAT_MARGIN)
            }
            Self::Hidden => wry::Rect {
                position: dpi::Position::Physical(dpi::PhysicalPosition::new(
                    w as i32, 0,
                )),
                size: dpi::Size::Physical(dpi::PhysicalSize::new(
                    panel_width,
                    h,
                )),
            },
        }
    }
}

/// Owns the webview panel and its IPC receiver.
pub(crate) struct PanelController {
    webview: Option<wry::WebView>,
    action_rx: Option<mpsc::Receiver<UiAction>>,
    visibility: Visibility,
    width: u32,
    last_stats_push: Instant,
}

impl PanelController {
    pub(crate) fn new() -> Self {
        Self {
            webview: None,
            action_rx: None,
            visibility: Visibility::Docked,
            width: webview::PANEL_WIDTH,
            last_stats_push: Instant::now(),
        }
    }

    /// Create the webview and send it the options schema. Failure is
    /// logged and the demo runs without a panel.
    pub(crate) fn init_webview(
        &mut self,
        window: &Window,
        width: u32,
        height: u32,
        engine: &GlintEngine,
    ) {
        match webview::create_webview(window, width, height, self.width) {
            Ok((wv, rx)) => {
                webview::push_schema(&wv, engine.options());
                webview::push_panel_pinned(&wv, self.visibility.pinned());
                self.webview = Some(wv);
                self.action_rx = Some(rx);
                self.push_presets(engine);
            }
            Err(e) => log::error!("options panel unavailable: {e}"),
        }
    }

    /// Pin or unpin.
    pub(crate) fn toggle(&mut self, window: &Window) {
        self.visibility = if self.visibility.pinned() {
            Visibility::Hidden
        } else {
            Visibility::Docked
        };
        if let Some(wv) = &self.webview {
            webview::push_panel_pinned(wv, self.visibility.pinned());
        }
        self.apply_layout(window);
    }

    /// Move the webview to match the current visibility and window size.
    pub(crate) fn apply_layout(&self, window: &Window) {
        if let Some(wv) = &self.webview {
            let size = window.inner_size();
            let bounds = self
                .visibility
                .bounds((size.width, size.height), self.width);
            let _ = wv.set_bounds(bounds);
        }
    }

    /// Float the unpinned panel in or out as the pointer nears the edge.
    pub(crate) fn update_peek(&mut self, mouse_x: f32, window: &Window) {
        let next = self.visibility.after_pointer(
            mouse_x,
            window.inner_size().width,
            self.width,
        );
        if next != self.visibility {
            self.visibility = next;
            self.apply_layout(window);
        }
    }

    /// Apply every action the panel posted since the last frame.
    pub(crate) fn drain_and_apply(
        &mut self,
        engine: &mut GlintEngine,
        window: &Window,
    ) {
        let Some(rx) = &self.action_rx else {
            return;
        };
        let actions: Vec<UiAction> = rx.try_iter().collect();
        let mut resync = false;

        for action in actions {
            match action {
                UiAction::SetOption { path, field, value } => {
                    let mut opts = engine.options().clone();
                    if opts.set_field(&path, &field, value) {
                        engine.set_options(opts);
                    } else {
                        log::debug!("option {path}.{field} unchanged or unknown");
                    }
                }
                UiAction::LoadPreset { name } => {
                    resync |= engine.load_preset(&name);
                }
                UiAction::ResetCamera => engine.reset_camera(),
                UiAction::TogglePanel => self.toggle(window),
                UiAction::ResizePanel { width } => {
                    let width = width.clamp(WIDTH_RANGE.0, WIDTH_RANGE.1);
                    if width != self.width {
                        self.width = width;
                        self.apply_layout(window);
                    }
                }
            }
        }

        if resync {
            self.push_options(engine);
            self.push_presets(engine);
        }
    }

    /// Re-scan the presets directory and send the picker its entries.
    fn push_presets(&self, engine: &GlintEngine) {
        if let Some(wv) = &self.webview {
            let names = Options::list_presets(Path::new(PRESETS_DIR));
            webview::push_presets(wv, &names, engine.active_preset());
        }
    }

    /// Re-send the engine's options after they changed outside the panel.
    pub(crate) fn push_options(&self, engine: &GlintEngine) {
        if let Some(wv) = &self.webview {
            webview::push_options(wv, engine.options());
        }
    }

    /// Send the FPS readout, throttled.
    pub(crate) fn push_stats_if_due(&mut self, now: Instant, engine: &GlintEngine) {
        let Some(wv) = &self.webview else {
            return;
        };
        if now.duration_since(self.last_stats_push) >= STATS_INTERVAL {
            webview::push_stats(wv, engine.fps());
            self.last_stats_push = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docked_panel_ignores_pointer() {
        let v = Visibility::Docked.after_pointer(0.0, 1000, 350);
        assert_eq!(v, Visibility::Docked);
    }

    #[test]
    fn right_edge_reveals_and_leaving_panel_hides() {
        let v = Visibility::Hidden.after_pointer(997.0, 1000, 350);
        assert_eq!(v, Visibility::Floating);
        // Still over the floating panel.
        let v = v.after_pointer(700.0, 1000, 350);
        assert_eq!(v, Visibility::Floating);
        // Back over the scene.
        let v = v.after_pointer(500.0, 1000, 350);
        assert_eq!(v, Visibility::Hidden);
    }

    #[test]
    fn hidden_panel_needs_the_edge() {
        let v = Visibility::Hidden.after_pointer(700.0, 1000, 350);
        assert_eq!(v, Visibility::Hidden);
    }

    #[test]
    fn hidden_bounds_sit_past_the_window() {
        let rect = Visibility::Hidden.bounds((800, 600), 350);
        let dpi::Position::Physical(pos) = rect.position else {
            panic!("expected physical position");
        };
        assert_eq!(pos.x, 800);
    }
}
