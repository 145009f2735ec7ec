use crate::camera::PerspectiveCamera;
use crate::config::{GroundConfig, SceneConfig};
use crate::lighting::Lighting;
use glam::{Quat, Vec3};
use pixelboy_common::{Rgb, Transform, Viewport};
use std::f32::consts::FRAC_PI_2;

/// Flat ground quad. Authored in the XY plane facing +Z, then laid down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    pub width: f32,
    pub depth: f32,
    pub color: Rgb,
    pub receives_shadow: bool,
    pub transform: Transform,
}

impl GroundPlane {
    pub fn new(config: &GroundConfig) -> Self {
        Self {
            width: config.width,
            depth: config.depth,
            color: config.color,
            receives_shadow: true,
            transform: Transform {
                position: Vec3::new(0.0, config.elevation, 0.0),
                rotation: Quat::from_rotation_x(-FRAC_PI_2),
                scale: Vec3::ONE,
            },
        }
    }

    /// Corners in world space, counter-clockwise seen from above.
    pub fn corners(&self) -> [Vec3; 4] {
        let (hw, hd) = (self.width / 2.0, self.depth / 2.0);
        let m = self.transform.to_matrix();
        [
            Vec3::new(-hw, -hd, 0.0),
            Vec3::new(hw, -hd, 0.0),
            Vec3::new(hw, hd, 0.0),
            Vec3::new(-hw, hd, 0.0),
        ]
        .map(|p| m.transform_point3(p))
    }

    pub fn normal(&self) -> Vec3 {
        self.transform.rotation * Vec3::Z
    }
}

/// Everything static about the view: backdrop, camera, lights, ground.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub background: Rgb,
    pub camera: PerspectiveCamera,
    pub lighting: Lighting,
    pub ground: GroundPlane,
}

impl Scene {
    /// Build the scene for an initial, non-empty viewport.
    pub fn new(config: &SceneConfig, viewport: Viewport) -> Self {
        Self {
            background: config.background,
            camera: PerspectiveCamera::new(&config.camera, viewport.aspect()),
            lighting: Lighting::new(&config.lighting),
            ground: GroundPlane::new(&config.ground),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ground_lies_flat_below_feet() {
        let ground = GroundPlane::new(&GroundConfig::default());
        let n = ground.normal();
        assert!((n - Vec3::Y).length() < 1e-6);
        for c in ground.corners() {
            assert!((c.y + 0.5).abs() < 1e-6);
            assert!((c.x.abs() - 10.0).abs() < 1e-5);
            assert!((c.z.abs() - 10.0).abs() < 1e-5);
        }
    }

    #[test]
    fn ground_winding_faces_up() {
        let ground = GroundPlane::new(&GroundConfig::default());
        let [a, b, c, _] = ground.corners();
        let face = (b - a).cross(c - a);
        assert!(face.y > 0.0);
    }

    #[test]
    fn scene_from_default_config() {
        let scene = Scene::new(&SceneConfig::default(), Viewport::new(1024, 768));
        assert_eq!(scene.background.hex(), 0x87ceeb);
        assert_eq!(scene.camera.aspect(), 1024.0 / 768.0);
        assert_eq!(scene.camera.fov_degrees, 75.0);
        assert_eq!(scene.camera.near, 0.1);
        assert_eq!(scene.camera.far, 1000.0);
        assert_eq!(scene.ground.color.hex(), 0x90ee90);
        assert!(scene.ground.receives_shadow);
    }
}
