//! Scene Runtime: owns the scene, the rigid figure group and the animation
//! clock, and drives a render backend through its lifecycle.
//!
//! # Invariants
//! - State only moves forward: Uninitialized -> Running -> TornDown.
//! - A frame step mutates nothing but the clock and the group pose before
//!   drawing.
//! - No frame step runs after teardown.

mod runtime;
mod schedule;

pub use runtime::{RuntimeError, RuntimeState, SceneRuntime};
pub use schedule::FrameSchedule;
