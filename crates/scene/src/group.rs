use crate::animation::IdlePose;
use glam::{Mat4, Quat, Vec3};
use pixelboy_common::Transform;
use pixelboy_figure::{BodyPart, CubePlacement, FigureLayout};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmSide {
    Left,
    Right,
}

/// The figure as one rigid body.
///
/// Owns every cube in the figure's local frame. Animation only ever touches
/// the group rotation and vertical offset; cube placements are fixed for the
/// life of the group.
#[derive(Debug, Clone)]
pub struct FigureGroup {
    cubes: Vec<CubePlacement>,
    left_arm: Range<usize>,
    right_arm: Range<usize>,
    rotation: f32,
    offset: f32,
}

impl FigureGroup {
    pub fn from_layout(layout: FigureLayout) -> Self {
        let left_arm = layout.span(BodyPart::LeftArm);
        let right_arm = layout.span(BodyPart::RightArm);
        Self {
            cubes: layout.into_cubes(),
            left_arm,
            right_arm,
            rotation: 0.0,
            offset: 0.0,
        }
    }

    pub fn cubes(&self) -> &[CubePlacement] {
        &self.cubes
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Rotation about the vertical axis, radians.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn vertical_offset(&self) -> f32 {
        self.offset
    }

    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
    }

    pub fn set_vertical_offset(&mut self, offset: f32) {
        self.offset = offset;
    }

    pub fn apply_pose(&mut self, pose: IdlePose) {
        self.rotation = pose.rotation;
        self.offset = pose.offset;
    }

    pub fn pose(&self) -> IdlePose {
        IdlePose {
            rotation: self.rotation,
            offset: self.offset,
        }
    }

    /// Indices of one arm's cubes, resolved when the group was built.
    pub fn arm_indices(&self, side: ArmSide) -> Range<usize> {
        match side {
            ArmSide::Left => self.left_arm.clone(),
            ArmSide::Right => self.right_arm.clone(),
        }
    }

    pub fn arm(&self, side: ArmSide) -> &[CubePlacement] {
        &self.cubes[self.arm_indices(side)]
    }

    pub fn transform(&self) -> Transform {
        Transform {
            position: Vec3::new(0.0, self.offset, 0.0),
            rotation: Quat::from_rotation_y(self.rotation),
            scale: Vec3::ONE,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        self.transform().to_matrix()
    }

    /// World-space center of cube `index` under the current group transform.
    pub fn world_position(&self, index: usize) -> Option<Vec3> {
        let local = self.cubes.get(index)?.position;
        Some(self.model_matrix().transform_point3(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixelboy_figure::build_layout;

    fn group() -> FigureGroup {
        FigureGroup::from_layout(build_layout())
    }

    #[test]
    fn starts_at_rest() {
        let g = group();
        assert_eq!(g.len(), 55);
        assert_eq!(g.pose(), IdlePose::REST);
        assert_eq!(g.model_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn arm_handles_point_at_shoulder_columns() {
        let g = group();
        let left = g.arm(ArmSide::Left);
        let right = g.arm(ArmSide::Right);
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 3);
        assert_eq!(left[0].position, Vec3::new(-2.0, 5.0, 0.0));
        assert_eq!(right[0].position, Vec3::new(2.0, 5.0, 0.0));
    }

    #[test]
    fn pose_moves_figure_rigidly() {
        let mut g = group();
        let before: Vec<Vec3> = g.cubes().iter().map(|c| c.position).collect();
        g.apply_pose(IdlePose {
            rotation: 0.25,
            offset: 0.2,
        });

        // Local placements are untouched.
        let after: Vec<Vec3> = g.cubes().iter().map(|c| c.position).collect();
        assert_eq!(before, after);

        // Pairwise distances survive the transform.
        let a = g.world_position(0).unwrap();
        let b = g.world_position(g.len() - 1).unwrap();
        let local = before[0].distance(before[g.len() - 1]);
        assert!((a.distance(b) - local).abs() < 1e-5);

        // Feet column rises by the offset.
        let leg = g.world_position(g.arm_indices(ArmSide::Right).end).unwrap();
        assert!((leg.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn rotation_is_about_vertical_axis() {
        let mut g = group();
        g.set_rotation(std::f32::consts::FRAC_PI_2);
        let idx = g.arm_indices(ArmSide::Right).start;
        let p = g.world_position(idx).unwrap();
        // (2, 5, 0) turned a quarter about +Y lands on (0, 5, -2).
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 5.0).abs() < 1e-5);
        assert!((p.z + 2.0).abs() < 1e-5);
        assert!(g.world_position(999).is_none());
    }
}
