//! Rendering Adapter: renderer-agnostic backend interface.
//!
//! # Invariants
//! - Backends never mutate scene or figure state; they only read it.
//! - `attach` runs once before any `draw`; nothing is drawn after `release`.
//!
//! The GPU backend lives in `pixelboy-render-wgpu`. [`DebugTextRenderer`]
//! renders frames to text for the CLI and for tests.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderBackend};

pub fn crate_info() -> &'static str {
    "pixelboy-render v0.1.0"
}
