//! Pointer-look orientation.
//!
//! The pointer position, normalized to `[-1, 1]` on both axes, selects a
//! yaw/pitch target; each frame the camera turns toward it, either snapping
//! or easing with a frame-rate independent factor.

use glam::{EulerRot, Quat, Vec2, Vec3};

use super::core::Camera;

/// Yaw/pitch offsets applied on top of a fixed eye position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraOrientationState {
    /// Current rotation about world Y (radians).
    pub yaw: f32,
    /// Current rotation about the camera X axis (radians).
    pub pitch: f32,
    /// Yaw the camera is moving toward.
    pub target_yaw: f32,
    /// Pitch the camera is moving toward.
    pub target_pitch: f32,
    /// Yaw at full horizontal pointer deflection.
    pub max_yaw: f32,
    /// Pitch at full vertical pointer deflection.
    pub max_pitch: f32,
    /// Fraction of the remaining angle kept per 60 Hz frame (0 = snap).
    pub smoothing: f32,
}

impl Default for CameraOrientationState {
    fn default() -> Self {
        Self::new(0.5, 0.3, 0.9)
    }
}

impl CameraOrientationState {
    /// Create a state looking straight ahead.
    #[must_use]
    pub fn new(max_yaw: f32, max_pitch: f32, smoothing: f32) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            target_yaw: 0.0,
            target_pitch: 0.0,
            max_yaw: max_yaw.abs(),
            max_pitch: max_pitch.abs(),
            smoothing: smoothing.clamp(0.0, 0.999),
        }
    }

    /// Return to the neutral orientation.
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
        self.target_yaw = 0.0;
        self.target_pitch = 0.0;
    }

    /// Change the angular limits, re-clamping current and target angles.
    pub fn set_limits(&mut self, max_yaw: f32, max_pitch: f32, smoothing: f32) {
        self.max_yaw = max_yaw.abs();
        self.max_pitch = max_pitch.abs();
        self.smoothing = smoothing.clamp(0.0, 0.999);
        self.yaw = self.yaw.clamp(-self.max_yaw, self.max_yaw);
        self.pitch = self.pitch.clamp(-self.max_pitch, self.max_pitch);
        self.target_yaw = self.target_yaw.clamp(-self.max_yaw, self.max_yaw);
        self.target_pitch =
            self.target_pitch.clamp(-self.max_pitch, self.max_pitch);
    }

    /// Rotation combining yaw (world Y) then pitch (local X).
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Advance `yaw`/`pitch` toward their targets by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if self.smoothing <= 0.0 {
            self.yaw = self.target_yaw;
            self.pitch = self.target_pitch;
            return;
        }
        let t = 1.0 - self.smoothing.powf(dt.max(0.0) * 60.0);
        self.yaw += (self.target_yaw - self.yaw) * t;
        self.pitch += (self.target_pitch - self.pitch) * t;
    }
}

/// Map a pixel position to `[-1, 1]` on both axes; y grows downward.
/// Zero-sized viewports map to the center.
#[must_use]
pub fn pointer_to_ndc(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    if width <= 0.0 || height <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(px / width * 2.0 - 1.0, py / height * 2.0 - 1.0)
}

/// Store new orientation targets from a normalized pointer position.
///
/// Coordinates outside `[-1, 1]` are clamped; non-finite input is ignored.
pub fn handle_pointer_movement(
    state: &mut CameraOrientationState,
    x: f32,
    y: f32,
) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    state.target_yaw = -x.clamp(-1.0, 1.0) * state.max_yaw;
    state.target_pitch = -y.clamp(-1.0, 1.0) * state.max_pitch;
}

/// Ease the state toward its targets and point the camera accordingly.
/// The eye position is left untouched.
pub fn handle_camera_rotation(
    camera: &mut Camera,
    state: &mut CameraOrientationState,
    dt: f32,
) {
    state.step(dt);
    let rotation = state.rotation();
    camera.target = camera.eye + rotation * Vec3::NEG_Z;
    camera.up = rotation * Vec3::Y;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 1.4),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 1.0,
            fovy: 70.0,
            znear: 0.1,
            zfar: 2000.0,
        }
    }

    #[test]
    fn pointer_ndc_mapping() {
        assert_eq!(pointer_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, -1.0));
        assert_eq!(pointer_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
        assert_eq!(pointer_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::ONE);
        assert_eq!(pointer_to_ndc(10.0, 10.0, 0.0, 600.0), Vec2::ZERO);
    }

    #[test]
    fn targets_are_clamped() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.0);
        handle_pointer_movement(&mut state, 3.0, -7.0);
        assert_eq!(state.target_yaw, -0.5);
        assert_eq!(state.target_pitch, 0.3);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.0);
        handle_pointer_movement(&mut state, 0.5, 0.5);
        let before = state;
        handle_pointer_movement(&mut state, f32::NAN, 0.0);
        handle_pointer_movement(&mut state, 0.0, f32::INFINITY);
        assert_eq!(state, before);
    }

    #[test]
    fn pointer_right_turns_camera_right() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.0);
        let mut cam = camera();
        handle_pointer_movement(&mut state, 1.0, 0.0);
        handle_camera_rotation(&mut cam, &mut state, 1.0 / 60.0);
        let forward = cam.target - cam.eye;
        assert!(forward.x > 0.0, "forward = {forward}");
        assert!((forward.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pointer_down_tilts_camera_down() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.0);
        let mut cam = camera();
        handle_pointer_movement(&mut state, 0.0, 1.0);
        handle_camera_rotation(&mut cam, &mut state, 1.0 / 60.0);
        assert!((cam.target - cam.eye).y < 0.0);
        assert!(cam.up.y > 0.9);
    }

    #[test]
    fn zero_smoothing_snaps() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.0);
        handle_pointer_movement(&mut state, -0.5, 0.5);
        state.step(0.001);
        assert_eq!(state.yaw, 0.25);
        assert_eq!(state.pitch, -0.15);
    }

    #[test]
    fn smoothing_converges_without_overshoot() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.9);
        handle_pointer_movement(&mut state, 1.0, 1.0);
        let mut last = state.yaw;
        for _ in 0..600 {
            state.step(1.0 / 60.0);
            assert!(state.yaw <= last);
            assert!(state.yaw >= -0.5);
            last = state.yaw;
        }
        assert!((state.yaw + 0.5).abs() < 1e-4);
        assert!((state.pitch + 0.3).abs() < 1e-4);
    }

    #[test]
    fn shrinking_limits_clamps_current_and_target() {
        let mut state = CameraOrientationState::new(0.5, 0.3, 0.0);
        handle_pointer_movement(&mut state, -1.0, 1.0);
        state.step(1.0 / 60.0);
        assert_eq!(state.yaw, 0.5);
        assert_eq!(state.pitch, -0.3);

        state.set_limits(0.2, 0.1, 0.5);
        assert_eq!(state.yaw, 0.2);
        assert_eq!(state.target_yaw, 0.2);
        assert_eq!(state.pitch, -0.1);
        assert_eq!(state.target_pitch, -0.1);

        state.set_limits(-0.4, 0.1, 2.0);
        assert_eq!(state.max_yaw, 0.4);
        assert!(state.smoothing < 1.0);
    }

    #[test]
    fn neutral_state_looks_down_negative_z() {
        let mut state = CameraOrientationState::default();
        let mut cam = camera();
        handle_camera_rotation(&mut cam, &mut state, 1.0 / 60.0);
        let forward = cam.target - cam.eye;
        assert!((forward - Vec3::NEG_Z).length() < 1e-6);
    }
}
