//! Scene state: everything the runtime owns and a backend draws.
//!
//! # Invariants
//! - The scene is static after construction except the camera aspect, which
//!   changes only on resize.
//! - Figure cubes never move individually; only the group transform changes.
//! - Animation time advances per frame, never from the wall clock.

mod animation;
mod camera;
mod config;
mod group;
mod lighting;
mod scene;

pub use animation::{AnimationClock, IdlePose};
pub use camera::PerspectiveCamera;
pub use config::{
    AnimationConfig, CameraConfig, ConfigError, GroundConfig, LightingConfig, SceneConfig,
};
pub use group::{ArmSide, FigureGroup};
pub use lighting::{AmbientLight, DirectionalLight, Lighting};
pub use scene::{GroundPlane, Scene};
