//! Scene description: the backdrop sphere, the reflective mini-sphere,
//! lights, background color, and the animation clock.
//!
//! The scene is pure data. Renderers read it each frame; option changes
//! flow in through [`Scene::apply_options`], which reports which meshes
//! need rebuilding.

/// Lights and the packed lighting uniform.
pub mod light;
/// UV sphere mesh generation.
pub mod sphere;

use glam::{Mat4, Vec3};

pub use light::{LightingUniform, SceneLights};
pub use sphere::{MeshVertex, SphereMesh};

use crate::options::Options;

/// White background.
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::WHITE;

/// Monotonic animation clock feeding the backdrop's `time` uniform.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Clock {
    /// Accumulated time in animation units.
    pub time: f32,
}

impl Clock {
    /// Advance by one step and return the new time.
    pub fn tick(&mut self, time_step: f32) -> f32 {
        self.time += time_step;
        self.time
    }
}

/// A sphere placed in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneObject {
    /// World-space center.
    pub position: Vec3,
    /// Sphere radius.
    pub radius: f32,
    /// Segment count used for both width and height.
    pub segments: u32,
    /// Whether the object is drawn.
    pub visible: bool,
}

impl SceneObject {
    /// Object-to-world transform (translation only; the radius is baked
    /// into the mesh).
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
    }

    /// Generate the sphere mesh for this object.
    pub fn build_mesh(&self) -> SphereMesh {
        SphereMesh::new(self.radius, self.segments, self.segments)
    }

    fn same_mesh(&self, other: &Self) -> bool {
        self.radius == other.radius && self.segments == other.segments
    }
}

/// Which GPU meshes must be regenerated after an options change.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshChanges {
    /// Backdrop radius or segment count changed.
    pub backdrop: bool,
    /// Mini-sphere radius or segment count changed.
    pub mini_sphere: bool,
}

/// Everything the renderer draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Large animated sphere surrounding the origin.
    pub backdrop: SceneObject,
    /// Small environment-mapped sphere.
    pub mini_sphere: SceneObject,
    /// The three scene lights.
    pub lights: SceneLights,
    /// Background clear color.
    pub clear_color: wgpu::Color,
    /// Animation clock.
    pub clock: Clock,
    /// Clock increment per frame.
    pub time_step: f32,
}

impl Scene {
    /// Build the scene described by `options`.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let b = &options.backdrop;
        let m = &options.mini_sphere;
        Self {
            backdrop: SceneObject {
                position: Vec3::ZERO,
                radius: b.radius,
                segments: b.segments,
                visible: true,
            },
            mini_sphere: SceneObject {
                position: m.position(),
                radius: m.radius,
                segments: m.segments,
                visible: true,
            },
            lights: SceneLights::from_options(&options.lighting),
            clear_color: CLEAR_COLOR,
            clock: Clock::default(),
            time_step: b.time_step,
        }
    }

    /// Apply new options, keeping the clock running.
    pub fn apply_options(&mut self, options: &Options) -> MeshChanges {
        let mut next = Self::from_options(options);
        next.clock = self.clock;
        next.backdrop.visible = self.backdrop.visible;
        next.mini_sphere.visible = self.mini_sphere.visible;

        let changes = MeshChanges {
            backdrop: !next.backdrop.same_mesh(&self.backdrop),
            mini_sphere: !next.mini_sphere.same_mesh(&self.mini_sphere),
        };
        *self = next;
        changes
    }

    /// Advance the animation clock by one frame.
    pub fn tick(&mut self) -> f32 {
        self.clock.tick(self.time_step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_accumulates_steps() {
        let mut clock = Clock::default();
        for _ in 0..10 {
            let _ = clock.tick(0.007);
        }
        assert!((clock.time - 0.07).abs() < 1e-6);
    }

    #[test]
    fn default_scene_layout() {
        let scene = Scene::from_options(&Options::default());
        assert_eq!(scene.backdrop.radius, 1.5);
        assert_eq!(scene.backdrop.segments, 32);
        assert_eq!(scene.mini_sphere.radius, 0.5);
        assert_eq!(scene.mini_sphere.segments, 64);
        assert_eq!(scene.mini_sphere.position, Vec3::new(0.38, 0.22, 0.7));
        assert_eq!(scene.clear_color, wgpu::Color::WHITE);
        assert_eq!(scene.time_step, 0.007);
    }

    #[test]
    fn apply_options_reports_mesh_changes_and_keeps_time() {
        let mut options = Options::default();
        let mut scene = Scene::from_options(&options);
        let _ = scene.tick();
        let _ = scene.tick();
        let time = scene.clock.time;

        options.mini_sphere.x = 1.0;
        let changes = scene.apply_options(&options);
        assert_eq!(changes, MeshChanges::default());
        assert_eq!(scene.mini_sphere.position.x, 1.0);
        assert_eq!(scene.clock.time, time);

        options.backdrop.radius = 1.0;
        let changes = scene.apply_options(&options);
        assert!(changes.backdrop);
        assert!(!changes.mini_sphere);
    }
}
