use crate::palette::Palette;
use glam::Vec3;
use pixelboy_common::Rgb;
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Head and hair columns farther than this (in |x| + |z|) are cut.
const CORNER_CUTOFF: f32 = 1.5;
/// Lowest head row.
const HEAD_BASE: f32 = 6.0;
const HAIR_ROW: f32 = 8.0;
const EYE_ROW: f32 = 7.0;
const TORSO_BASE: f32 = 3.0;
const ARM_BASE: f32 = 5.0;
const ARM_X: f32 = 2.0;
const LEG_X: f32 = 0.5;

/// One unit cube of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubePlacement {
    /// Cube center in grid units, relative to the figure origin.
    pub position: Vec3,
    pub color: Rgb,
}

impl CubePlacement {
    pub fn new(x: f32, y: f32, z: f32, color: Rgb) -> Self {
        Self {
            position: Vec3::new(x, y, z),
            color,
        }
    }
}

/// Named region of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyPart {
    Head,
    Hair,
    Eyes,
    Torso,
    LeftArm,
    RightArm,
    LeftLeg,
    RightLeg,
    Shoes,
}

impl BodyPart {
    pub const ALL: [BodyPart; 9] = [
        BodyPart::Head,
        BodyPart::Hair,
        BodyPart::Eyes,
        BodyPart::Torso,
        BodyPart::LeftArm,
        BodyPart::RightArm,
        BodyPart::LeftLeg,
        BodyPart::RightLeg,
        BodyPart::Shoes,
    ];
}

/// Contiguous run of placements belonging to one body part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartSpan {
    pub part: BodyPart,
    pub range: Range<usize>,
}

/// Ordered cube placements plus the body part each run belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureLayout {
    cubes: Vec<CubePlacement>,
    parts: Vec<PartSpan>,
}

impl FigureLayout {
    pub fn cubes(&self) -> &[CubePlacement] {
        &self.cubes
    }

    pub fn parts(&self) -> &[PartSpan] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Index range of a body part within [`FigureLayout::cubes`].
    pub fn span(&self, part: BodyPart) -> Range<usize> {
        self.parts
            .iter()
            .find(|s| s.part == part)
            .map(|s| s.range.clone())
            .unwrap_or(0..0)
    }

    pub fn part(&self, part: BodyPart) -> &[CubePlacement] {
        &self.cubes[self.span(part)]
    }

    /// Axis-aligned bounds (min, max) covering every unit cube.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        let half = Vec3::splat(0.5);
        self.cubes.iter().fold(
            (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY)),
            |(min, max), c| (min.min(c.position - half), max.max(c.position + half)),
        )
    }

    pub fn into_cubes(self) -> Vec<CubePlacement> {
        self.cubes
    }
}

/// Accumulates placements while recording part boundaries.
struct LayoutBuilder {
    cubes: Vec<CubePlacement>,
    parts: Vec<PartSpan>,
}

impl LayoutBuilder {
    fn new() -> Self {
        Self {
            cubes: Vec::with_capacity(64),
            parts: Vec::with_capacity(BodyPart::ALL.len()),
        }
    }

    fn part(&mut self, part: BodyPart, fill: impl FnOnce(&mut Vec<CubePlacement>)) {
        let start = self.cubes.len();
        fill(&mut self.cubes);
        self.parts.push(PartSpan {
            part,
            range: start..self.cubes.len(),
        });
    }

    fn finish(self) -> FigureLayout {
        FigureLayout {
            cubes: self.cubes,
            parts: self.parts,
        }
    }
}

fn rounded(x: i32, z: i32) -> bool {
    (x.abs() + z.abs()) as f32 <= CORNER_CUTOFF
}

/// Vertical run of three cubes starting at `base`.
fn column(cubes: &mut Vec<CubePlacement>, x: f32, base: f32, z: f32, color: Rgb) {
    for y in 0..3 {
        cubes.push(CubePlacement::new(x, base + y as f32, z, color));
    }
}

/// Build the figure with body-part spans.
pub fn build_layout() -> FigureLayout {
    let palette = Palette::DEFAULT;
    let mut layout = LayoutBuilder::new();

    layout.part(BodyPart::Head, |cubes| {
        for x in -1..=1 {
            for y in 0..=2 {
                for z in -1..=1 {
                    if rounded(x, z) {
                        cubes.push(CubePlacement::new(
                            x as f32,
                            y as f32 + HEAD_BASE,
                            z as f32,
                            palette.skin,
                        ));
                    }
                }
            }
        }
    });

    layout.part(BodyPart::Hair, |cubes| {
        for x in -1..=1 {
            for z in -1..=1 {
                if rounded(x, z) {
                    cubes.push(CubePlacement::new(x as f32, HAIR_ROW, z as f32, palette.hair));
                    // Fringe hangs one unit in front of the face.
                    if x == 0 && z == 1 {
                        cubes.push(CubePlacement::new(0.0, EYE_ROW, 2.0, palette.hair));
                    }
                }
            }
        }
    });

    layout.part(BodyPart::Eyes, |cubes| {
        cubes.push(CubePlacement::new(-0.5, EYE_ROW, 1.0, palette.eye));
        cubes.push(CubePlacement::new(0.5, EYE_ROW, 1.0, palette.eye));
    });

    layout.part(BodyPart::Torso, |cubes| {
        for x in -1..=1 {
            for y in 0..=2 {
                for z in [-0.5, 0.5] {
                    cubes.push(CubePlacement::new(
                        x as f32,
                        y as f32 + TORSO_BASE,
                        z,
                        palette.shirt,
                    ));
                }
            }
        }
    });

    layout.part(BodyPart::LeftArm, |cubes| {
        column(cubes, -ARM_X, ARM_BASE, 0.0, palette.skin)
    });
    layout.part(BodyPart::RightArm, |cubes| {
        column(cubes, ARM_X, ARM_BASE, 0.0, palette.skin)
    });
    layout.part(BodyPart::LeftLeg, |cubes| {
        column(cubes, -LEG_X, 0.0, 0.0, palette.pants)
    });
    layout.part(BodyPart::RightLeg, |cubes| {
        column(cubes, LEG_X, 0.0, 0.0, palette.pants)
    });

    layout.part(BodyPart::Shoes, |cubes| {
        cubes.push(CubePlacement::new(-LEG_X, 0.0, 0.5, palette.shoe));
        cubes.push(CubePlacement::new(LEG_X, 0.0, 0.5, palette.shoe));
    });

    layout.finish()
}

/// Build the figure as a flat list of unit cubes.
pub fn build_figure() -> Vec<CubePlacement> {
    build_layout().into_cubes()
}
