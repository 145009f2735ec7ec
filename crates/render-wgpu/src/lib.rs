//! wgpu render backend for the pixel boy scene.
//!
//! Renders a shadow-mapped ground plane and the figure as instanced unit
//! cubes, lit by one ambient and one directional light.
//!
//! # Invariants
//! - Cube instances are uploaded once; animation reaches the GPU only as the
//!   figure group transform in the globals uniform.
//! - Renderer never mutates scene state.

mod backend;
mod context;
mod gpu;
mod shaders;
mod shadow;

pub use backend::{NoOverlay, OverlayFrame, OverlayPainter, WgpuBackend};
pub use context::GpuContext;
pub use gpu::WgpuRenderer;

/// Errors from GPU setup and frame submission.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    UnsupportedSurface,
    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
    #[error("backend not attached to a scene")]
    NotAttached,
    #[error("backend resources already released")]
    Released,
}
