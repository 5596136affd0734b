//! Rendering subsystems: the two sphere materials, the environment cube
//! capture, and the screen-space dot-screen resolve.

pub mod backdrop;
pub mod env_probe;
pub mod fresnel;
pub mod mesh;
pub mod mipmap;
pub(crate) mod pipeline_util;
pub mod postprocess;
