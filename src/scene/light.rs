//! Scene lights and their packed GPU uniform.

use glam::Vec3;

use crate::options::LightingOptions;

/// Shared light color (cyan).
pub const LIGHT_COLOR: [f32; 3] = [0.0, 1.0, 1.0];

/// Omni light with a cutoff distance and decay exponent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World-space position.
    pub position: Vec3,
    /// Scalar intensity.
    pub intensity: f32,
    /// Range beyond which the light contributes nothing (0 = unlimited).
    pub distance: f32,
    /// Distance falloff exponent.
    pub decay: f32,
}

/// Light arriving from a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Position the light shines from, toward the origin.
    pub position: Vec3,
    /// Scalar intensity.
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector from the scene toward the light.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or(Vec3::Y)
    }
}

/// The demo's three lights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLights {
    /// Linear RGB color shared by all lights.
    pub color: [f32; 3],
    /// Point light above and in front of the scene.
    pub key: PointLight,
    /// Short-range point light off to the side.
    pub fill: PointLight,
    /// Dim directional light from behind.
    pub sun: DirectionalLight,
    /// How strongly lighting modulates the backdrop.
    pub strength: f32,
}

impl Default for SceneLights {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

impl SceneLights {
    /// Lights at their fixed positions with intensities from `options`.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            color: LIGHT_COLOR,
            key: PointLight {
                position: Vec3::new(0.0, 10.0, 10.0),
                intensity: options.key_intensity,
                distance: 100.0,
                decay: 2.0,
            },
            fill: PointLight {
                position: Vec3::new(30.0, 3.0, 1.8),
                intensity: options.fill_intensity,
                distance: 4.0,
                decay: 3.0,
            },
            sun: DirectionalLight {
                position: Vec3::new(-100.0, 0.0, -100.0),
                intensity: options.sun_intensity,
            },
            strength: options.strength,
        }
    }

    /// Pack into the GPU layout.
    pub fn to_uniform(&self) -> LightingUniform {
        let point = |l: &PointLight| {
            (
                l.position.extend(l.intensity).to_array(),
                [l.distance, l.decay, 0.0, 0.0],
            )
        };
        let (key_position, key_params) = point(&self.key);
        let (fill_position, fill_params) = point(&self.fill);
        LightingUniform {
            key_position,
            key_params,
            fill_position,
            fill_params,
            sun_direction: self
                .sun
                .direction()
                .extend(self.sun.intensity)
                .to_array(),
            color: [self.color[0], self.color[1], self.color[2], self.strength],
        }
    }
}

/// GPU lighting uniform, mirrored by `LightingUniform` in
/// `modules/lighting.wgsl`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Key light: xyz position, w intensity.
    pub key_position: [f32; 4],
    /// Key light: x cutoff distance, y decay.
    pub key_params: [f32; 4],
    /// Fill light: xyz position, w intensity.
    pub fill_position: [f32; 4],
    /// Fill light: x cutoff distance, y decay.
    pub fill_params: [f32; 4],
    /// Directional light: xyz toward the light, w intensity.
    pub sun_direction: [f32; 4],
    /// rgb light color, a lighting strength.
    pub color: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_layout_matches_shader() {
        assert_eq!(size_of::<LightingUniform>(), 96);
    }

    #[test]
    fn default_lights_pack_expected_values() {
        let u = SceneLights::default().to_uniform();
        assert_eq!(u.key_position, [0.0, 10.0, 10.0, 1.0]);
        assert_eq!(u.key_params[..2], [100.0, 2.0]);
        assert_eq!(u.fill_position, [30.0, 3.0, 1.8, 2.7]);
        assert_eq!(u.fill_params[..2], [4.0, 3.0]);
        assert!((u.sun_direction[3] - 0.08).abs() < 1e-6);
        assert_eq!(u.color[..3], LIGHT_COLOR);
    }

    #[test]
    fn sun_points_toward_its_position() {
        let sun = SceneLights::default().sun;
        let d = sun.direction();
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!(d.x < 0.0 && d.z < 0.0 && d.y.abs() < 1e-6);
    }
}
