use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera placement and projection parameters.
pub struct CameraOptions {
    /// Eye X.
    #[schemars(title = "X", range(min = -10.0, max = 10.0), extend("step" = 0.01))]
    pub x: f32,
    /// Eye Y.
    #[schemars(title = "Y", range(min = -10.0, max = 10.0), extend("step" = 0.01))]
    pub y: f32,
    /// Eye Z.
    #[schemars(title = "Z", range(min = 0.0, max = 10.0), extend("step" = 0.01))]
    pub z: f32,
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 1.4,
            fovy: 70.0,
            znear: 0.1,
            zfar: 2000.0,
        }
    }
}

impl CameraOptions {
    /// Eye position as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}
