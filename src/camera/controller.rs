use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};
use wgpu::util::DeviceExt;

use super::core::{Camera, CameraUniform};
use super::orientation::{
    handle_camera_rotation, handle_pointer_movement, pointer_to_ndc,
    CameraOrientationState,
};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::options::{Options, RotationMode};

/// Keeps the polar angle away from the poles.
const POLAR_EPSILON: f32 = 1e-6;

/// Damped orbit around a target point.
///
/// User gestures accumulate into pending deltas; [`update`](Self::update)
/// applies them, either fully or by `damping_factor` per call with the
/// remainder decaying geometrically, so a damped gesture converges to the
/// same end state as an undamped one.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at.
    pub target: Vec3,
    radius: f32,
    /// Azimuth about +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_pan: Vec3,
    pending_scale: f32,
    /// Ease gestures out over several updates.
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update when damping.
    pub damping_factor: f32,
    /// Rotation sensitivity (1 = a full viewport height drag turns 2π).
    pub rotate_speed: f32,
    /// Pan sensitivity.
    pub pan_speed: f32,
    /// Dolly sensitivity.
    pub zoom_speed: f32,
    /// Closest allowed eye distance to the target.
    pub min_distance: f32,
    /// Farthest allowed eye distance to the target.
    pub max_distance: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            radius: 1.0,
            theta: 0.0,
            phi: PI / 2.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_pan: Vec3::ZERO,
            pending_scale: 1.0,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::MAX,
        }
    }
}

impl OrbitControls {
    /// Orbit `target` starting from `eye`.
    #[must_use]
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let mut controls = Self {
            target,
            ..Self::default()
        };
        controls.set_position(eye);
        controls
    }

    /// Current eye position derived from the spherical state.
    pub fn eye(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        self.target
            + self.radius
                * Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Eye distance to the target.
    pub fn distance(&self) -> f32 {
        self.radius
    }

    /// Whether any gesture is still being applied.
    pub fn is_moving(&self) -> bool {
        self.pending_theta.abs() > 1e-6
            || self.pending_phi.abs() > 1e-6
            || self.pending_pan.length_squared() > 1e-12
            || (self.pending_scale - 1.0).abs() > 1e-6
    }

    /// Place the eye at `eye`, keeping the target. Discards pending motion.
    pub fn set_position(&mut self, eye: Vec3) {
        let offset = eye - self.target;
        self.radius = offset.length();
        if self.radius > 0.0 {
            self.theta = offset.x.atan2(offset.z);
            self.phi = (offset.y / self.radius).clamp(-1.0, 1.0).acos();
        } else {
            self.theta = 0.0;
            self.phi = PI / 2.0;
        }
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.stop();
    }

    /// Move both eye and target, discarding pending motion.
    pub fn reset(&mut self, eye: Vec3, target: Vec3) {
        self.target = target;
        self.set_position(eye);
    }

    /// Drop any pending gesture.
    pub fn stop(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_pan = Vec3::ZERO;
        self.pending_scale = 1.0;
    }

    /// Queue a rotation from a pointer drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.pending_theta -= TAU * delta.x / h * self.rotate_speed;
        self.pending_phi -= TAU * delta.y / h * self.rotate_speed;
    }

    /// Queue a pan so content under the pointer follows a drag of `delta`
    /// pixels at the target's depth.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fovy_degrees: f32) {
        let h = viewport_height.max(1.0);
        let offset = self.eye() - self.target;
        let target_distance =
            offset.length() * (fovy_degrees.to_radians() / 2.0).tan();

        let forward = (-offset).normalize_or(Vec3::NEG_Z);
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);

        let left_amount = 2.0 * delta.x * target_distance / h * self.pan_speed;
        let up_amount = 2.0 * delta.y * target_distance / h * self.pan_speed;
        self.pending_pan += -right * left_amount + up * up_amount;
    }

    /// Queue a dolly. Positive `scroll` moves toward the target.
    pub fn zoom(&mut self, scroll: f32) {
        if scroll == 0.0 || !scroll.is_finite() {
            return;
        }
        let scale = 0.95_f32.powf(scroll.abs() * self.zoom_speed);
        if scroll > 0.0 {
            self.pending_scale *= scale;
        } else {
            self.pending_scale /= scale;
        }
    }

    /// Apply pending motion and return the new eye position.
    pub fn update(&mut self) -> Vec3 {
        let factor = if self.enable_damping {
            self.damping_factor.clamp(0.0, 1.0)
        } else {
            1.0
        };

        self.theta += self.pending_theta * factor;
        self.phi += self.pending_phi * factor;
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.target += self.pending_pan * factor;

        let min = self.min_distance.max(0.0);
        let max = self.max_distance.max(min);
        self.radius = (self.radius * self.pending_scale).clamp(min, max);
        self.pending_scale = 1.0;

        if self.enable_damping {
            let keep = 1.0 - factor;
            self.pending_theta *= keep;
            self.pending_phi *= keep;
            self.pending_pan *= keep;
        } else {
            self.pending_theta = 0.0;
            self.pending_phi = 0.0;
            self.pending_pan = Vec3::ZERO;
        }

        self.eye()
    }
}

/// Camera state machine: the scene camera plus whichever rotation mode
/// drives it. Holds no GPU resources.
///
/// Two positions are tracked separately. `configured` is the eye position
/// last taken from the options; the eye only jumps when that changes.
/// `home` is where pointer-look holds the eye, anchored wherever the
/// camera was when pointer-look began.
#[derive(Debug, Clone)]
pub struct CameraRig {
    /// The scene camera.
    pub camera: Camera,
    /// Orbit state (used in [`RotationMode::Orbit`]).
    pub orbit: OrbitControls,
    /// Pointer-look state (used in [`RotationMode::PointerLook`]).
    pub orientation: CameraOrientationState,
    mode: RotationMode,
    configured: Vec3,
    home: Vec3,
    viewport: (u32, u32),
}

impl CameraRig {
    /// Camera at the configured position, looking at the origin.
    pub fn new(options: &Options, viewport: (u32, u32)) -> Self {
        let position = options.camera.position();
        let (w, h) = viewport;
        let mut rig = Self {
            camera: Camera {
                eye: position,
                target: Vec3::ZERO,
                up: Vec3::Y,
                aspect: w as f32 / h.max(1) as f32,
                fovy: options.camera.fovy,
                znear: options.camera.znear,
                zfar: options.camera.zfar,
            },
            orbit: OrbitControls::new(position, Vec3::ZERO),
            orientation: CameraOrientationState::default(),
            mode: options.controls.rotation_mode,
            configured: position,
            home: position,
            viewport,
        };
        rig.apply_options(options);
        rig
    }

    /// Push projection and control parameters from `options`. The eye
    /// moves only when the configured position itself changed.
    pub fn apply_options(&mut self, options: &Options) {
        let co = &options.camera;
        self.camera.fovy = co.fovy;
        self.camera.znear = co.znear;
        self.camera.zfar = co.zfar;

        let ctl = &options.controls;
        self.orbit.enable_damping = ctl.enable_damping;
        self.orbit.damping_factor = ctl.damping_factor;
        self.orbit.rotate_speed = ctl.rotate_speed;
        self.orbit.pan_speed = ctl.pan_speed;
        self.orbit.zoom_speed = ctl.zoom_speed;
        self.orbit.min_distance = ctl.min_distance;
        self.orbit.max_distance = ctl.max_distance;
        self.orientation
            .set_limits(ctl.max_yaw, ctl.max_pitch, ctl.smoothing);
        self.set_mode(ctl.rotation_mode);

        let position = co.position();
        if position != self.configured {
            self.configured = position;
            self.set_position(position);
        }
    }

    /// Active rotation mode.
    pub fn mode(&self) -> RotationMode {
        self.mode
    }

    /// Eye position pointer-look holds.
    pub fn home(&self) -> Vec3 {
        self.home
    }

    /// Switch rotation mode, keeping the eye where it is.
    pub fn set_mode(&mut self, mode: RotationMode) {
        if mode == self.mode {
            return;
        }
        log::debug!("rotation mode: {mode:?}");
        self.mode = mode;
        match mode {
            RotationMode::Orbit => {
                self.orbit.reset(self.camera.eye, Vec3::ZERO);
            }
            RotationMode::PointerLook => {
                self.home = self.camera.eye;
                self.orientation.reset();
            }
        }
    }

    /// Toggle between orbit and pointer-look.
    pub fn toggle_mode(&mut self) -> RotationMode {
        let next = match self.mode {
            RotationMode::Orbit => RotationMode::PointerLook,
            RotationMode::PointerLook => RotationMode::Orbit,
        };
        self.set_mode(next);
        next
    }

    /// Place the eye.
    pub fn set_position(&mut self, position: Vec3) {
        self.home = position;
        self.camera.eye = position;
        self.orbit.set_position(position);
    }

    /// Restore the configured eye position and a neutral orientation.
    pub fn reset(&mut self, options: &Options) {
        self.configured = options.camera.position();
        self.home = self.configured;
        self.camera.eye = self.home;
        self.camera.target = Vec3::ZERO;
        self.camera.up = Vec3::Y;
        self.orbit.reset(self.home, Vec3::ZERO);
        self.orientation.reset();
    }

    /// Pointer moved to pixel `(x, y)`. Returns the normalized position.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Vec2 {
        let ndc = pointer_to_ndc(
            x,
            y,
            self.viewport.0 as f32,
            self.viewport.1 as f32,
        );
        handle_pointer_movement(&mut self.orientation, ndc.x, ndc.y);
        ndc
    }

    /// Drag-rotate by `delta` pixels (orbit mode only).
    pub fn rotate(&mut self, delta: Vec2) {
        if self.mode == RotationMode::Orbit {
            self.orbit.rotate(delta, self.viewport.1 as f32);
        }
    }

    /// Drag-pan by `delta` pixels (orbit mode only).
    pub fn pan(&mut self, delta: Vec2) {
        if self.mode == RotationMode::Orbit {
            self.orbit
                .pan(delta, self.viewport.1 as f32, self.camera.fovy);
        }
    }

    /// Dolly by a scroll amount (orbit mode only).
    pub fn zoom(&mut self, delta: f32) {
        if self.mode == RotationMode::Orbit {
            self.orbit.zoom(delta);
        }
    }

    /// Per-frame camera update from the active mode.
    pub fn update(&mut self, dt: f32) {
        match self.mode {
            RotationMode::Orbit => {
                self.camera.eye = self.orbit.update();
                self.camera.target = self.orbit.target;
                self.camera.up = Vec3::Y;
            }
            RotationMode::PointerLook => {
                self.camera.eye = self.home;
                handle_camera_rotation(
                    &mut self.camera,
                    &mut self.orientation,
                    dt,
                );
            }
        }
    }

    /// Track the viewport size (aspect and pointer normalization).
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.viewport = (width, height);
            self.camera.resize(width, height);
        }
    }
}

/// The camera rig plus its GPU uniform and bind group.
pub struct CameraController {
    /// Camera state and controls.
    pub rig: CameraRig,
    /// GPU uniform mirror of the camera plus the animation clock.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0 of every scene pipeline.
    pub buffer: wgpu::Buffer,
    /// Layout of the camera bind group.
    pub layout: wgpu::BindGroupLayout,
    /// Camera bind group.
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the camera and its GPU resources from the current options.
    pub fn new(context: &RenderContext, options: &Options) -> Self {
        let rig = CameraRig::new(
            options,
            (context.config.width, context.config.height),
        );
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&rig.camera);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[pipeline_helpers::vertex_uniform_buffer(0)],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Camera Bind Group"),
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
            });

        Self {
            rig,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Upload the camera matrices and the animation clock.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue, time: f32) {
        self.uniform.update_view_proj(&self.rig.camera);
        self.uniform.time = time;
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rig(mode: RotationMode) -> (Options, CameraRig) {
        let mut options = Options::default();
        options.controls.rotation_mode = mode;
        options.controls.enable_damping = false;
        let rig = CameraRig::new(&options, (800, 600));
        (options, rig)
    }

    fn orbit_sideways(rig: &mut CameraRig) -> Vec3 {
        rig.rotate(Vec2::new(200.0, 0.0));
        rig.update(1.0 / 60.0);
        rig.camera.eye
    }

    #[test]
    fn unrelated_option_change_keeps_eye_after_toggle() {
        let (mut options, mut rig) = rig(RotationMode::Orbit);
        let orbited = orbit_sideways(&mut rig);
        assert!((orbited - options.camera.position()).length() > 0.5);

        assert_eq!(rig.toggle_mode(), RotationMode::PointerLook);
        options.controls.smoothing = 0.5;
        rig.apply_options(&options);
        rig.update(1.0 / 60.0);

        assert!((rig.camera.eye - orbited).length() < 1e-5, "{}", rig.camera.eye);
        assert_eq!(rig.home(), orbited);
    }

    #[test]
    fn mode_change_from_options_matches_toggle() {
        let (mut options, mut via_options) = rig(RotationMode::Orbit);
        let (_, mut via_toggle) = rig(RotationMode::Orbit);
        let orbited = orbit_sideways(&mut via_options);
        let _ = orbit_sideways(&mut via_toggle);

        options.controls.rotation_mode = RotationMode::PointerLook;
        via_options.apply_options(&options);
        let _ = via_toggle.toggle_mode();

        assert_eq!(via_options.mode(), via_toggle.mode());
        assert!((via_options.camera.eye - orbited).length() < 1e-5);
        assert!((via_toggle.camera.eye - orbited).length() < 1e-5);
    }

    #[test]
    fn configured_position_change_moves_eye() {
        let (mut options, mut rig) = rig(RotationMode::PointerLook);
        options.camera.x = 2.0;
        rig.apply_options(&options);
        rig.update(1.0 / 60.0);
        assert_eq!(rig.camera.eye, options.camera.position());
    }

    #[test]
    fn toggling_back_to_orbit_keeps_eye() {
        let (_, mut rig) = rig(RotationMode::Orbit);
        let orbited = orbit_sideways(&mut rig);
        let _ = rig.toggle_mode();
        rig.update(1.0 / 60.0);
        assert_eq!(rig.toggle_mode(), RotationMode::Orbit);
        rig.update(1.0 / 60.0);
        assert!((rig.camera.eye - orbited).length() < 1e-4);
        assert_eq!(rig.camera.target, Vec3::ZERO);
    }

    #[test]
    fn reset_restores_configured_camera() {
        let (options, mut rig) = rig(RotationMode::Orbit);
        let _ = orbit_sideways(&mut rig);
        let _ = rig.toggle_mode();
        rig.orientation.target_yaw = 0.3;
        rig.reset(&options);
        rig.update(1.0 / 60.0);
        assert_eq!(rig.camera.eye, options.camera.position());
        assert_eq!(rig.orientation.yaw, 0.0);
        assert_eq!(rig.orientation.target_yaw, 0.0);
    }

    #[test]
    fn gestures_ignored_in_pointer_look() {
        let (options, mut rig) = rig(RotationMode::PointerLook);
        rig.rotate(Vec2::new(200.0, 0.0));
        rig.zoom(5.0);
        rig.update(1.0 / 60.0);
        assert_eq!(rig.camera.eye, options.camera.position());
    }

    fn controls(damping: bool) -> OrbitControls {
        let mut c = OrbitControls::new(Vec3::new(0.0, 0.0, 1.4), Vec3::ZERO);
        c.enable_damping = damping;
        c
    }

    #[test]
    fn set_position_round_trips() {
        let eye = Vec3::new(0.3, -0.7, 1.1);
        let c = OrbitControls::new(eye, Vec3::new(0.1, 0.0, 0.0));
        assert!((c.eye() - eye).length() < 1e-5);
    }

    #[test]
    fn undamped_rotation_applies_at_once() {
        let mut c = controls(false);
        c.rotate(Vec2::new(100.0, 0.0), 400.0);
        let eye = c.update();
        // theta -= 2π/4: camera swings from +Z to -X
        assert!((eye - Vec3::new(-1.4, 0.0, 0.0)).length() < 1e-4, "{eye}");
        assert!(!c.is_moving());
    }

    #[test]
    fn damping_converges_to_undamped_result() {
        let mut damped = controls(true);
        let mut undamped = controls(false);
        let delta = Vec2::new(37.0, -21.0);
        damped.rotate(delta, 600.0);
        undamped.rotate(delta, 600.0);
        damped.pan(Vec2::new(5.0, 3.0), 600.0, 70.0);
        undamped.pan(Vec2::new(5.0, 3.0), 600.0, 70.0);

        let first = damped.update();
        let expected = undamped.update();
        assert!((first - expected).length() > 1e-3);

        let mut eye = first;
        for _ in 0..1000 {
            eye = damped.update();
        }
        assert!((eye - expected).length() < 1e-3, "{eye} vs {expected}");
        assert!((damped.target - undamped.target).length() < 1e-4);
        assert!(!damped.is_moving());
    }

    #[test]
    fn eye_never_crosses_the_poles() {
        let mut c = controls(false);
        c.rotate(Vec2::new(0.0, 10_000.0), 100.0);
        let eye = c.update();
        assert!(eye.y < 1.4 + 1e-4);
        assert!(c.phi > 0.0 && c.phi < PI);
        c.rotate(Vec2::new(0.0, -50_000.0), 100.0);
        let _ = c.update();
        assert!(c.phi > 0.0 && c.phi < PI);
    }

    #[test]
    fn zoom_direction_and_distance_clamp() {
        let mut c = controls(false);
        c.zoom(1.0);
        let _ = c.update();
        assert!(c.distance() < 1.4);

        c.zoom(-2.0);
        let _ = c.update();
        assert!(c.distance() > 1.4);

        c.min_distance = 1.0;
        c.max_distance = 2.0;
        c.zoom(-500.0);
        let _ = c.update();
        assert_eq!(c.distance(), 2.0);
        c.zoom(500.0);
        let _ = c.update();
        assert_eq!(c.distance(), 1.0);
    }

    #[test]
    fn pan_moves_target_sideways() {
        let mut c = controls(false);
        c.pan(Vec2::new(100.0, 0.0), 500.0, 70.0);
        let _ = c.update();
        // Dragging right drags the scene right: target moves left.
        assert!(c.target.x < 0.0);
        assert!(c.target.y.abs() < 1e-6);
        assert!(c.target.z.abs() < 1e-6);
    }
}
