use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
/// Dot-screen post-processing parameters.
pub struct PostProcessingOptions {
    /// Apply the dot-screen effect (off = plain copy to screen).
    #[schemars(title = "Dot Screen")]
    pub dot_screen: bool,
    /// Dot grid frequency.
    #[schemars(title = "Dot Scale", range(min = 0.5, max = 10.0), extend("step" = 0.1))]
    pub scale: f32,
    /// Grid rotation in radians.
    #[schemars(title = "Dot Angle", range(min = 0.0, max = 3.14), extend("step" = 0.01))]
    pub angle: f32,
    /// Blend between the source image (0) and the full effect (1).
    #[schemars(title = "Dot Strength", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub strength: f32,
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            dot_screen: true,
            scale: 4.0,
            angle: 1.57,
            strength: 1.0,
        }
    }
}
