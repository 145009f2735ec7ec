//! Figure Builder: the fixed voxel layout of the pixel boy.
//!
//! # Invariants
//! - Building is pure: no inputs, no randomness, no side effects.
//! - Every placement is a unit cube centered on its position, in the figure's
//!   local frame (feet at y = 0, facing +Z).
//! - Overlapping placements are intentional and preserved as listed.

mod builder;
mod palette;

pub use builder::{BodyPart, CubePlacement, FigureLayout, PartSpan, build_figure, build_layout};
pub use palette::Palette;
