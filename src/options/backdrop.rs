use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Animated backdrop sphere.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Backdrop", inline)]
#[serde(default)]
pub struct BackdropOptions {
    /// Sphere radius.
    #[schemars(title = "Radius", range(min = 0.5, max = 5.0), extend("step" = 0.05))]
    pub radius: f32,
    /// Width and height segment count.
    #[schemars(skip)]
    pub segments: u32,
    /// Animation clock increment per frame.
    #[schemars(title = "Speed", range(min = 0.0, max = 0.05), extend("step" = 0.001))]
    pub time_step: f32,
}

impl Default for BackdropOptions {
    fn default() -> Self {
        Self {
            radius: 1.5,
            segments: 32,
            time_step: 0.007,
        }
    }
}
