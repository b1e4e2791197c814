use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    r: u8,
    g: u8,
    b: u8,
    a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn alpha(&self) -> f32 {
        self.a
    }
}

/// Serialises as a CSS colour: `#rrggbb` when opaque, `rgba(..)` otherwise.
impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
        }
    }
}

/// Inner, mid and outer gradient stops of a petal.
pub type Palette = [Rgba; 3];

pub const PETAL_PALETTES: [Palette; 3] = [
    [
        Rgba::rgb(0xff, 0xc3, 0xd1),
        Rgba::rgb(0xff, 0x8f, 0xb1),
        Rgba::rgb(0xff, 0x5c, 0x91),
    ],
    [
        Rgba::rgb(0xff, 0xb8, 0xd4),
        Rgba::rgb(0xff, 0x86, 0xb3),
        Rgba::rgb(0xff, 0x53, 0x91),
    ],
    [
        Rgba::rgb(0xff, 0xd1, 0xe0),
        Rgba::rgb(0xff, 0xa1, 0xc0),
        Rgba::rgb(0xff, 0x71, 0x9f),
    ],
];

pub const SKY_TOP: Rgba = Rgba::rgb(0x07, 0x10, 0x1b);
pub const SKY_MID: Rgba = Rgba::rgb(0x07, 0x12, 0x24);
pub const SKY_BOTTOM: Rgba = Rgba::rgb(0x06, 0x10, 0x17);
pub const GROUND: Rgba = Rgba::rgb(0x06, 0x12, 0x14);

pub const STEM: Rgba = Rgba::rgba(120, 185, 95, 0.95);
pub const LEAF: Rgba = Rgba::rgba(94, 153, 64, 0.85);
pub const PETAL_OUTLINE: Rgba = Rgba::rgba(255, 255, 255, 0.06);
pub const FLOWER_CENTER: Rgba = Rgba::rgba(255, 220, 180, 0.95);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_is_hex() {
        assert_eq!(PETAL_PALETTES[0][0].to_string(), "#ffc3d1");
        assert_eq!(GROUND.to_string(), "#061214");
    }

    #[test]
    fn translucent_is_rgba() {
        assert_eq!(STEM.to_string(), "rgba(120,185,95,0.95)");
        assert_eq!(PETAL_OUTLINE.to_string(), "rgba(255,255,255,0.06)");
    }
}
