//! Screen-space passes run after the main scene pass.

/// Dot-screen resolve pass and its uniform.
pub mod dot_screen;
/// Off-screen scene targets plus the final pass.
pub mod post_process;

pub use dot_screen::{DotScreenPass, DotScreenUniform};
pub use post_process::PostProcessStack;
