use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Environment cube capture parameters.
pub struct EnvironmentOptions {
    /// Cube face edge length in texels.
    pub resolution: u32,
    /// Near plane of the face cameras.
    pub near: f32,
    /// Far plane of the face cameras.
    pub far: f32,
}

impl Default for EnvironmentOptions {
    fn default() -> Self {
        Self {
            resolution: 256,
            near: 0.1,
            far: 10.0,
        }
    }
}
