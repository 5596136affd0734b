use web_time::{Duration, Instant};

/// Upper bound on the per-frame delta handed to animation code, so a
/// stalled frame (window drag, tab switch) does not cause a jump.
const MAX_FRAME_DELTA: f32 = 0.1;

/// Frame timing with FPS calculation and optional frame limiting
pub struct FrameTiming {
    /// Target FPS (0 = unlimited)
    target_fps: u32,
    /// Minimum frame duration based on target FPS
    min_frame_duration: Duration,
    /// Last frame timestamp
    last_frame: Instant,
    /// Clamped duration of the previous frame in seconds
    last_delta: f32,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
}

impl FrameTiming {
    /// Create a new frame timer with the given FPS target (0 = unlimited).
    pub fn new(target_fps: u32) -> Self {
        let min_frame_duration = if target_fps > 0 {
            Duration::from_secs_f64(1.0 / target_fps as f64)
        } else {
            Duration::ZERO
        };

        Self {
            target_fps,
            min_frame_duration,
            last_frame: Instant::now(),
            last_delta: 1.0 / 60.0,
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Call at the start of each frame. Returns true if enough time has passed
    /// to render.
    pub fn should_render(&self) -> bool {
        if self.target_fps == 0 {
            return true;
        }
        self.last_frame.elapsed() >= self.min_frame_duration
    }

    /// Call after rendering to update timing.
    pub fn end_frame(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.record(elapsed.as_secs_f32());
    }

    fn record(&mut self, frame_time: f32) {
        if frame_time > 0.0 {
            self.last_delta = frame_time.min(MAX_FRAME_DELTA);
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Seconds spent on the previous frame, clamped for animation use.
    pub fn delta(&self) -> f32 {
        self.last_delta
    }

    /// Get the current FPS (smoothed)
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_always_renders() {
        assert!(FrameTiming::new(0).should_render());
    }

    #[test]
    fn delta_is_clamped() {
        let mut timing = FrameTiming::new(0);
        timing.record(2.0);
        assert_eq!(timing.delta(), MAX_FRAME_DELTA);
        timing.record(0.016);
        assert_eq!(timing.delta(), 0.016);
    }

    #[test]
    fn fps_moves_toward_instant_rate() {
        let mut timing = FrameTiming::new(0);
        for _ in 0..500 {
            timing.record(1.0 / 30.0);
        }
        assert!((timing.fps() - 30.0).abs() < 0.5);
    }

    #[test]
    fn zero_length_frames_are_ignored() {
        let mut timing = FrameTiming::new(0);
        timing.record(0.0);
        assert_eq!(timing.fps(), 60.0);
    }
}
