//! Small runtime helpers.

/// Frame-rate limiting, FPS smoothing and clamped frame deltas.
pub mod frame_timing;
