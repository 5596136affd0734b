//! Camera system for 3D scene viewing.
//!
//! Provides the perspective camera and its GPU uniform, damped orbit
//! controls, and the pointer-driven look-around mode.

/// Camera controller owning GPU resources plus orbit and pointer-look state.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Pointer position to yaw/pitch mapping with optional smoothing.
pub mod orientation;
