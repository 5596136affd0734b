use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Reflective mini-sphere placement and fresnel material.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Mini Sphere", inline)]
#[serde(default)]
pub struct MiniSphereOptions {
    /// Center X.
    #[schemars(title = "X", range(min = -5.0, max = 5.0), extend("step" = 0.01))]
    pub x: f32,
    /// Center Y.
    #[schemars(title = "Y", range(min = -5.0, max = 5.0), extend("step" = 0.01))]
    pub y: f32,
    /// Center Z.
    #[schemars(title = "Z", range(min = -5.0, max = 5.0), extend("step" = 0.01))]
    pub z: f32,
    /// Sphere radius.
    #[schemars(skip)]
    pub radius: f32,
    /// Width and height segment count.
    #[schemars(skip)]
    pub segments: u32,
    /// Minimum reflectivity.
    #[schemars(title = "Fresnel Bias", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub bias: f32,
    /// Reflectivity gain at grazing angles.
    #[schemars(title = "Fresnel Scale", range(min = 0.0, max = 2.0), extend("step" = 0.05))]
    pub scale: f32,
    /// Falloff exponent.
    #[schemars(title = "Fresnel Power", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub power: f32,
    /// Ratio of indices of refraction for the refracted lookups.
    #[schemars(title = "Refraction Ratio", range(min = 0.5, max = 1.5), extend("step" = 0.01))]
    pub refraction_ratio: f32,
}

impl Default for MiniSphereOptions {
    fn default() -> Self {
        Self {
            x: 0.38,
            y: 0.22,
            z: 0.7,
            radius: 0.5,
            segments: 64,
            bias: 0.1,
            scale: 1.0,
            power: 2.0,
            refraction_ratio: 1.02,
        }
    }
}

impl MiniSphereOptions {
    /// Center as a vector.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Material parameters in shader order (bias, scale, power, ratio).
    #[must_use]
    pub fn fresnel_params(&self) -> [f32; 4] {
        [self.bias, self.scale, self.power, self.refraction_ratio]
    }
}
