//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the glint crate.
#[derive(Debug)]
pub enum GlintError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// WGSL composition failure.
    Shader(String),
    /// Requested preset does not exist.
    UnknownPreset(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// No `<canvas>` matched the selector (web builds).
    MissingCanvas(String),
}

impl fmt::Display for GlintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::UnknownPreset(name) => {
                write!(f, "unknown preset: {name}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::MissingCanvas(selector) => {
                write!(f, "no canvas element matches `{selector}`")
            }
        }
    }
}

impl std::error::Error for GlintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for GlintError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for GlintError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
