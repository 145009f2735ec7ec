//! Shared value types used across the pixel boy workspace.

mod types;

pub use types::{Rgb, Transform, Viewport};
