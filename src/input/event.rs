//! Window-system-independent pointer and modifier events.
//!
//! The viewer translates winit events into these; embedders without winit
//! build them directly and feed them to
//! [`GlintEngine::handle_input`](crate::GlintEngine::handle_input).

/// Pointer and modifier input understood by the
/// [`InputProcessor`](super::InputProcessor).
///
/// ```ignore
/// engine.handle_input(InputEvent::CursorMoved { x: 100.0, y: 200.0 });
/// engine.handle_input(InputEvent::CursorLeft);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer at `(x, y)` in physical pixels from the top-left corner.
    CursorMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position.
        y: f32,
    },
    /// Pointer left the canvas. Held buttons are released and the next
    /// move starts a fresh drag.
    CursorLeft,
    /// A button changed state.
    MouseButton {
        /// Which button.
        button: MouseButton,
        /// `true` on press.
        pressed: bool,
    },
    /// Wheel notches; positive dollies toward the target.
    Scroll {
        /// Signed notch count (pixel deltas are scaled to notches).
        delta: f32,
    },
    /// Shift turns a left drag into a pan.
    ModifiersChanged {
        /// Shift held.
        shift: bool,
    },
}

/// Pixel scroll distance treated as one wheel notch.
pub const PIXELS_PER_NOTCH: f32 = 100.0;

#[cfg(feature = "viewer")]
impl InputEvent {
    /// Normalize a winit wheel delta to [`InputEvent::Scroll`].
    #[must_use]
    pub fn from_wheel(delta: winit::event::MouseScrollDelta) -> Self {
        let delta = match delta {
            winit::event::MouseScrollDelta::LineDelta(_, y) => y,
            winit::event::MouseScrollDelta::PixelDelta(pos) => {
                pos.y as f32 / PIXELS_PER_NOTCH
            }
        };
        Self::Scroll { delta }
    }
}

/// Buttons the controls distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Rotate (or pan with shift).
    Left,
    /// Pan.
    Right,
    /// Unused by the controls.
    Middle,
}

#[cfg(feature = "viewer")]
impl From<winit::event::MouseButton> for MouseButton {
    fn from(button: winit::event::MouseButton) -> Self {
        match button {
            winit::event::MouseButton::Right => Self::Right,
            winit::event::MouseButton::Middle => Self::Middle,
            _ => Self::Left,
        }
    }
}
