use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
/// Light intensities. Positions and color are fixed.
pub struct LightingOptions {
    /// Key point light intensity.
    #[schemars(title = "Key Light", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub key_intensity: f32,
    /// Fill point light intensity.
    #[schemars(title = "Fill Light", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub fill_intensity: f32,
    /// Directional light intensity.
    #[schemars(title = "Sun Light", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub sun_intensity: f32,
    /// How strongly lighting modulates the backdrop shader.
    #[schemars(title = "Strength", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub strength: f32,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            key_intensity: 1.0,
            fill_intensity: 2.7,
            sun_intensity: 0.08,
            strength: 1.0,
        }
    }
}
