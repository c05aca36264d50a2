//! Level palettes for filled cells.
//!
//! Colors repeat every ten levels, the way the classic game cycles its block
//! colors.

use crate::fb::Rgb;
use crate::types::BlockTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Rgb,
    pub secondary: Rgb,
    pub tertiary: Rgb,
}

impl Palette {
    pub fn color(&self, tag: BlockTag) -> Rgb {
        match tag {
            BlockTag::Primary => self.primary,
            BlockTag::Secondary => self.secondary,
            BlockTag::Tertiary => self.tertiary,
        }
    }
}

const fn palette(primary: Rgb, tertiary: Rgb) -> Palette {
    Palette {
        primary: Rgb::new(236, 236, 236),
        secondary: primary,
        tertiary,
    }
}

pub const PALETTES: [Palette; 10] = [
    palette(Rgb::new(0, 88, 248), Rgb::new(60, 188, 252)),
    palette(Rgb::new(0, 168, 0), Rgb::new(184, 248, 24)),
    palette(Rgb::new(216, 0, 204), Rgb::new(248, 120, 248)),
    palette(Rgb::new(0, 88, 248), Rgb::new(88, 216, 84)),
    palette(Rgb::new(228, 0, 88), Rgb::new(88, 248, 152)),
    palette(Rgb::new(88, 248, 152), Rgb::new(104, 136, 252)),
    palette(Rgb::new(248, 56, 0), Rgb::new(124, 124, 124)),
    palette(Rgb::new(104, 68, 252), Rgb::new(168, 0, 32)),
    palette(Rgb::new(0, 88, 248), Rgb::new(248, 56, 0)),
    palette(Rgb::new(248, 56, 0), Rgb::new(252, 160, 68)),
];

/// Palette for a display level.
pub fn palette_for_level(level: u32) -> &'static Palette {
    &PALETTES[(level % 10) as usize]
}
