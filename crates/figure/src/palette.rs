use pixelboy_common::Rgb;

/// Fixed material colors of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub skin: Rgb,
    pub hair: Rgb,
    pub shirt: Rgb,
    pub pants: Rgb,
    pub shoe: Rgb,
    pub eye: Rgb,
}

impl Palette {
    pub const DEFAULT: Self = Self {
        skin: Rgb::from_hex(0xffdbac),
        hair: Rgb::from_hex(0x8b4513),
        shirt: Rgb::from_hex(0x4169e1),
        pants: Rgb::from_hex(0x2f4f4f),
        shoe: Rgb::from_hex(0x1a1a1a),
        eye: Rgb::BLACK,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::DEFAULT
    }
}
