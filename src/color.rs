//! Span color evaluation.
//!
//! Document readers hand over span colors as a single packed integer in
//! `0xRRGGBB` order (the layout PDF toolkits use for sRGB fill colors).
//! That packing is the contract between the reader and this module, so the
//! unpacking lives in one place: [`Rgb::unpack`].

use serde::{Deserialize, Serialize};

use crate::document::Span;

/// An sRGB color split into named 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Split a packed `0xRRGGBB` integer into channels.
    ///
    /// Bits above the low 24 are ignored.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn unpack(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xFF) as u8,
            g: ((packed >> 8) & 0xFF) as u8,
            b: (packed & 0xFF) as u8,
        }
    }

    /// Inverse of [`Rgb::unpack`].
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// Tolerant "looks red" test.
///
/// Matches when the red channel is strictly above `red_floor` and both
/// other channels are strictly below their ceilings. Rendered text rarely
/// comes out as pure `#FF0000`, so this is a band, not an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedThreshold {
    pub red_floor: u8,
    pub green_ceiling: u8,
    pub blue_ceiling: u8,
}

impl Default for RedThreshold {
    fn default() -> Self {
        Self {
            red_floor: 150,
            green_ceiling: 100,
            blue_ceiling: 100,
        }
    }
}

impl RedThreshold {
    pub fn matches(&self, rgb: Rgb) -> bool {
        rgb.r > self.red_floor && rgb.g < self.green_ceiling && rgb.b < self.blue_ceiling
    }

    pub fn is_red(&self, packed: u32) -> bool {
        self.matches(Rgb::unpack(packed))
    }

    /// An option is correct when any of its spans is red: the label line
    /// alone is enough, and so is a single continuation span.
    pub fn any_red<'a>(&self, spans: impl IntoIterator<Item = &'a Span>) -> bool {
        spans.into_iter().any(|span| self.is_red(span.color))
    }
}
