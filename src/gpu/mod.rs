//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, shader composition, shared
//! bind-group-layout helpers, and off-screen / cube render targets.

/// Shared wgpu boilerplate helpers for bind group layouts and pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Off-screen color, depth and cube render targets.
pub mod texture;
