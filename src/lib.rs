// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

//! Shader-textured sphere demo on wgpu.
//!
//! A large sphere animated by a time-driven noise shader surrounds a small
//! environment-mapped sphere whose material mixes reflection and chromatic
//! refraction by a fresnel term. The frame is resolved to the screen
//! through a dot-screen post-process. The camera orbits with damping or
//! follows the pointer.
//!
//! # Key entry points
//!
//! - [`GlintEngine`] - the rendering engine
//! - [`Options`] - runtime configuration and presets
//! - [`Viewer`] - standalone window / canvas (feature `viewer`)
//!
//! # Frame
//!
//! clock tick → camera update → six-face environment capture around the
//! mini-sphere (plus mip generation) → main pass into an off-screen target
//! → dot-screen pass to the swapchain.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
#[cfg(feature = "gui")]
pub mod gui;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "viewer", target_arch = "wasm32", not(feature = "web")))]
compile_error!("the `viewer` feature on wasm32 needs the `web` feature");
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::command::GlintCommand;
pub use engine::GlintEngine;
pub use error::GlintError;
pub use input::{InputEvent, InputProcessor, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
