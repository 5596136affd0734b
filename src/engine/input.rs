//! Input methods for GlintEngine

use super::command::GlintCommand;
use super::GlintEngine;
use crate::input::InputEvent;

impl GlintEngine {
    /// Process a platform-agnostic input event.
    ///
    /// The event is translated by the engine's
    /// [`InputProcessor`](crate::input::InputProcessor) and every resulting
    /// command is executed.
    ///
    /// ```ignore
    /// engine.handle_input(InputEvent::CursorMoved { x, y });
    /// engine.handle_input(InputEvent::Scroll { delta: 1.0 });
    /// ```
    pub fn handle_input(&mut self, event: InputEvent) {
        for cmd in self.input.handle_event(event) {
            self.execute(cmd);
        }
    }

    /// Handle a key press by its `KeyCode` name (e.g. `"KeyR"`).
    ///
    /// Returns the bound command, if any, after executing it. Host-level
    /// commands such as [`GlintCommand::TogglePanel`] are returned for the
    /// caller to act on.
    pub fn handle_key_press(&mut self, key: &str) -> Option<GlintCommand> {
        let cmd = self.input.handle_key_press(key)?;
        self.execute(cmd);
        Some(cmd)
    }

}
