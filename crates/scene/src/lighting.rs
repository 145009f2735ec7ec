use crate::config::LightingConfig;
use glam::{Mat4, Vec3};
use pixelboy_common::Rgb;

/// Half-width of the square the shadow camera covers, in grid units. Wide
/// enough for the whole 20x20 ground plus the figure's lean.
const SHADOW_EXTENT: f32 = 15.0;
const SHADOW_NEAR: f32 = 1.0;
const SHADOW_FAR: f32 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Rgb,
    pub intensity: f32,
}

/// Sun-style light shining from `position` toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Rgb,
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub casts_shadow: bool,
    pub shadow_map_size: u32,
}

impl DirectionalLight {
    /// Unit vector from the lit surface toward the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).normalize()
    }

    /// Orthographic view-projection used to render and sample the shadow map.
    pub fn shadow_view_projection(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        let proj = Mat4::orthographic_rh(
            -SHADOW_EXTENT,
            SHADOW_EXTENT,
            -SHADOW_EXTENT,
            SHADOW_EXTENT,
            SHADOW_NEAR,
            SHADOW_FAR,
        );
        proj * view
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
}

impl Lighting {
    pub fn new(config: &LightingConfig) -> Self {
        Self {
            ambient: AmbientLight {
                color: config.ambient_color,
                intensity: config.ambient_intensity,
            },
            sun: DirectionalLight {
                color: config.sun_color,
                intensity: config.sun_intensity,
                position: config.sun_position,
                target: Vec3::ZERO,
                casts_shadow: config.cast_shadows,
                shadow_map_size: config.shadow_map_size,
            },
        }
    }
}
