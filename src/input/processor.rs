//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and the engine's
//! [`execute`](crate::GlintEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use crate::engine::command::GlintCommand;
use crate::options::KeybindingOptions;

/// Converts raw window events into [`GlintCommand`]s.
///
/// # Usage
///
/// ```ignore
/// // In the event loop:
/// for cmd in input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("KeyR") {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Last cursor position in physical pixels (`None` before the first
    /// move).
    mouse_pos: Option<Vec2>,
    /// Whether the primary mouse button is currently held.
    left_pressed: bool,
    /// Whether the secondary mouse button is currently held.
    right_pressed: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            mouse_pos: None,
            left_pressed: false,
            right_pressed: false,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Whether any drag button is held.
    #[must_use]
    pub fn dragging(&self) -> bool {
        self.left_pressed || self.right_pressed
    }

    /// Replace the key bindings (after an options change).
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Release all buttons, e.g. when the cursor leaves the window.
    pub fn release_mouse_state(&mut self) {
        self.left_pressed = false;
        self.right_pressed = false;
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<GlintCommand> {
        self.key_bindings.lookup(key).map(GlintCommand::from)
    }

    /// Process a raw input event into zero or more commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<GlintCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::CursorLeft => {
                self.release_mouse_state();
                self.mouse_pos = None;
                Vec::new()
            }
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right => self.right_pressed = pressed,
                    MouseButton::Middle => {}
                }
                Vec::new()
            }
            InputEvent::Scroll { delta } => {
                vec![GlintCommand::Zoom { delta }]
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                Vec::new()
            }
        }
    }

    /// Cursor moved: always report the position; while dragging also
    /// rotate (left) or pan (right, or shift + left).
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Vec<GlintCommand> {
        let pos = Vec2::new(x, y);
        let delta = self.mouse_pos.map_or(Vec2::ZERO, |last| pos - last);
        self.mouse_pos = Some(pos);

        let mut commands = vec![GlintCommand::PointerMoved { x, y }];
        if delta == Vec2::ZERO {
            return commands;
        }
        if self.right_pressed || (self.left_pressed && self.shift_pressed) {
            commands.push(GlintCommand::PanCamera { delta });
        } else if self.left_pressed {
            commands.push(GlintCommand::RotateCamera { delta });
        }
        commands
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(p: &mut InputProcessor, x: f32, y: f32) -> Vec<GlintCommand> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    fn button(p: &mut InputProcessor, button: MouseButton, pressed: bool) {
        assert!(p
            .handle_event(InputEvent::MouseButton { button, pressed })
            .is_empty());
    }

    #[test]
    fn hover_only_reports_pointer() {
        let mut p = InputProcessor::new();
        assert_eq!(
            moved(&mut p, 10.0, 20.0),
            vec![GlintCommand::PointerMoved { x: 10.0, y: 20.0 }]
        );
        assert_eq!(
            moved(&mut p, 15.0, 20.0),
            vec![GlintCommand::PointerMoved { x: 15.0, y: 20.0 }]
        );
    }

    #[test]
    fn left_drag_rotates() {
        let mut p = InputProcessor::new();
        let _ = moved(&mut p, 10.0, 10.0);
        button(&mut p, MouseButton::Left, true);
        let cmds = moved(&mut p, 13.0, 6.0);
        assert_eq!(
            cmds[1],
            GlintCommand::RotateCamera {
                delta: Vec2::new(3.0, -4.0)
            }
        );
        button(&mut p, MouseButton::Left, false);
        assert_eq!(moved(&mut p, 20.0, 6.0).len(), 1);
    }

    #[test]
    fn right_or_shift_drag_pans() {
        let mut p = InputProcessor::new();
        let _ = moved(&mut p, 0.0, 0.0);
        button(&mut p, MouseButton::Right, true);
        assert!(matches!(
            moved(&mut p, 1.0, 0.0)[1],
            GlintCommand::PanCamera { .. }
        ));
        button(&mut p, MouseButton::Right, false);

        assert!(p
            .handle_event(InputEvent::ModifiersChanged { shift: true })
            .is_empty());
        button(&mut p, MouseButton::Left, true);
        assert!(matches!(
            moved(&mut p, 2.0, 0.0)[1],
            GlintCommand::PanCamera { .. }
        ));
    }

    #[test]
    fn first_move_has_no_drag_delta() {
        let mut p = InputProcessor::new();
        button(&mut p, MouseButton::Left, true);
        assert_eq!(moved(&mut p, 300.0, 300.0).len(), 1);
    }

    #[test]
    fn scroll_zooms() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: -2.0 }),
            vec![GlintCommand::Zoom { delta: -2.0 }]
        );
    }

    #[test]
    fn default_key_bindings() {
        let p = InputProcessor::new();
        assert_eq!(p.handle_key_press("KeyR"), Some(GlintCommand::ResetCamera));
        assert_eq!(
            p.handle_key_press("KeyM"),
            Some(GlintCommand::ToggleRotationMode)
        );
        assert_eq!(
            p.handle_key_press("KeyP"),
            Some(GlintCommand::ToggleDotScreen)
        );
        assert_eq!(
            p.handle_key_press("Backslash"),
            Some(GlintCommand::TogglePanel)
        );
        assert_eq!(p.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn cursor_left_ends_drag_without_jump() {
        let mut p = InputProcessor::new();
        let _ = moved(&mut p, 10.0, 10.0);
        button(&mut p, MouseButton::Left, true);
        assert!(p.dragging());
        assert!(p.handle_event(InputEvent::CursorLeft).is_empty());
        assert!(!p.dragging());

        // Re-entering far away reports the position but never rotates.
        button(&mut p, MouseButton::Left, true);
        let cmds = moved(&mut p, 500.0, 300.0);
        assert_eq!(cmds, vec![GlintCommand::PointerMoved { x: 500.0, y: 300.0 }]);
    }
}
