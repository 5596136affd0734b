//! The engine's complete interactive vocabulary.
//!
//! Every user-facing operation (key press, mouse gesture, GUI button, or
//! programmatic call) is represented as a `GlintCommand`. Consumers
//! construct commands and pass them to
//! [`GlintEngine::execute`](super::GlintEngine::execute).

use glam::Vec2;

use crate::options::KeyAction;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(GlintCommand::ToggleDotScreen);
/// engine.execute(GlintCommand::Zoom { delta: 1.0 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GlintCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Return the camera to its configured position and orientation.
    ResetCamera,

    /// Switch between orbit and pointer-look rotation.
    ToggleRotationMode,

    /// Pointer moved to an absolute position (physical pixels).
    PointerMoved {
        /// Horizontal position.
        x: f32,
        /// Vertical position (grows downward).
        y: f32,
    },

    /// Rotate the camera by `delta` pixels of mouse movement.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of mouse movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = zoom in, negative = zoom out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },

    // ── Effects ─────────────────────────────────────────────────────
    /// Enable or disable the dot-screen pass.
    ToggleDotScreen,

    // ── Host UI ─────────────────────────────────────────────────────
    /// Show or hide the options panel. Handled by the viewer; the engine
    /// ignores it.
    TogglePanel,
}

impl From<KeyAction> for GlintCommand {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::ResetCamera => Self::ResetCamera,
            KeyAction::ToggleRotationMode => Self::ToggleRotationMode,
            KeyAction::ToggleDotScreen => Self::ToggleDotScreen,
            KeyAction::TogglePanel => Self::TogglePanel,
        }
    }
}
