use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Discrete actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// KeyR = "reset_camera"
/// Backslash = "toggle_panel"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Return the camera to its configured position.
    ResetCamera,
    /// Switch between orbit and pointer-look.
    ToggleRotationMode,
    /// Enable or disable the dot-screen pass.
    ToggleDotScreen,
    /// Show or hide the options panel.
    TogglePanel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Keyboard bindings. Keys use the `winit::keyboard::KeyCode` debug
/// format (`"KeyR"`, `"Backslash"`, ...).
pub struct KeybindingOptions {
    /// Key string → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("KeyR".into(), KeyAction::ResetCamera),
            ("KeyM".into(), KeyAction::ToggleRotationMode),
            ("KeyP".into(), KeyAction::ToggleDotScreen),
            ("Backslash".into(), KeyAction::TogglePanel),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }

    /// First key bound to `action`, if any (for help text).
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        let mut keys: Vec<&str> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|(k, _)| k.as_str())
            .collect();
        keys.sort_unstable();
        keys.first().copied()
    }
}
