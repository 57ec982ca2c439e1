// Scene colors.
//
// Colors are authored as sRGB hex values (the page palette) and converted to
// linear RGB for the renderer, which blends in a linear HDR target.

use glam::Vec3;

pub const BLUE: u32 = 0x0066cc;
pub const PURPLE: u32 = 0x8e44ad;
pub const PAPER: u32 = 0xfaf8f5;
pub const INK: u32 = 0x05070d;

#[inline]
fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert a `0xRRGGBB` sRGB color to linear RGB.
pub fn linear_from_hex(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(
        srgb_channel_to_linear(r),
        srgb_channel_to_linear(g),
        srgb_channel_to_linear(b),
    )
}

/// Linear RGBA from a hex color and an opacity.
#[inline]
pub fn rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let c = linear_from_hex(hex);
    [c.x, c.y, c.z, alpha]
}

/// Color class of an orbiting node. Each hue has a normal and a bold shade;
/// nodes blend toward the bold shade as they approach the core.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hue {
    Purple,
    Cyan,
    Green,
    Gold,
    Red,
}

impl Hue {
    pub const ALL: [Hue; 5] = [Hue::Purple, Hue::Cyan, Hue::Green, Hue::Gold, Hue::Red];

    pub fn from_index(i: usize) -> Self {
        Self::ALL[i % Self::ALL.len()]
    }

    pub fn normal_hex(self) -> u32 {
        match self {
            Hue::Purple => 0x8b5cf6,
            Hue::Cyan => 0x0077cc,
            Hue::Green => 0x059669,
            Hue::Gold => 0xf59e0b,
            Hue::Red => 0xdc2626,
        }
    }

    pub fn bold_hex(self) -> u32 {
        match self {
            Hue::Purple => 0x6d28d9,
            Hue::Cyan => 0x005599,
            Hue::Green => 0x047857,
            Hue::Gold => 0xd97706,
            Hue::Red => 0xb91c1c,
        }
    }

    pub fn normal(self) -> Vec3 {
        linear_from_hex(self.normal_hex())
    }

    pub fn bold(self) -> Vec3 {
        linear_from_hex(self.bold_hex())
    }

    /// Blend between the normal and bold shade; `t` is clamped to [0, 1].
    pub fn shade(self, t: f32) -> Vec3 {
        self.normal().lerp(self.bold(), t.clamp(0.0, 1.0))
    }
}
