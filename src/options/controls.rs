use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// What drives camera rotation.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Drag to orbit the origin, right/shift-drag to pan, scroll to zoom.
    #[default]
    Orbit,
    /// Fixed eye; the pointer position steers yaw and pitch.
    PointerLook,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Camera interaction parameters for both rotation modes.
pub struct ControlsOptions {
    /// Active rotation mode.
    #[schemars(title = "Rotation Mode")]
    pub rotation_mode: RotationMode,
    /// Ease orbit gestures out over several frames.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending orbit motion applied per frame.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Orbit rotation sensitivity.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Orbit pan sensitivity.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Orbit dolly sensitivity.
    #[schemars(title = "Zoom Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub zoom_speed: f32,
    /// Closest orbit distance.
    #[schemars(skip)]
    pub min_distance: f32,
    /// Farthest orbit distance.
    #[schemars(skip)]
    pub max_distance: f32,
    /// Pointer-look yaw at full deflection (radians).
    #[schemars(title = "Max Yaw", range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub max_yaw: f32,
    /// Pointer-look pitch at full deflection (radians).
    #[schemars(title = "Max Pitch", range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub max_pitch: f32,
    /// Pointer-look easing (0 = snap).
    #[schemars(title = "Smoothing", range(min = 0.0, max = 0.99), extend("step" = 0.01))]
    pub smoothing: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            rotation_mode: RotationMode::Orbit,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.05,
            max_distance: 50.0,
            max_yaw: 0.5,
            max_pitch: 0.3,
            smoothing: 0.9,
        }
    }
}
