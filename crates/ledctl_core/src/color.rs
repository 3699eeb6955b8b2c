//! Palette and RGB color types.

use serde::{Deserialize, Serialize};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    #[must_use]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scales each channel by `factor` (expected in `[0, 1]` but not
    /// enforced), rounds to the nearest integer, and clamps to `[0, 255]`.
    #[must_use]
    pub fn scale_round(self, factor: f32) -> Self {
        let scale = |c: u8| -> u8 {
            let v = (f32::from(c) * factor).round();
            v.clamp(0.0, 255.0) as u8
        };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Scales each channel by `num / den` using integer truncation, as the
    /// master-brightness post-process requires.
    #[must_use]
    pub fn scale_truncate(self, num: u32, den: u32) -> Self {
        debug_assert!(den > 0);
        let scale = |c: u8| -> u8 { (u32::from(c) * num / den).min(255) as u8 };
        Self {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    /// Channel-wise maximum of two colors, the rule used to layer
    /// segments into a frame.
    #[must_use]
    pub fn max(self, other: Rgb) -> Self {
        Self {
            r: self.r.max(other.r),
            g: self.g.max(other.g),
            b: self.b.max(other.b),
        }
    }
}

/// Identifies one of the five palette slots `A`..`E`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PaletteId(pub char);

impl PaletteId {
    /// Parses a single uppercase letter `A`..`E`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::from_char(c)
    }

    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        if ('A'..='E').contains(&c) {
            Some(Self(c))
        } else {
            None
        }
    }
}

impl std::fmt::Display for PaletteId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A 6-entry RGB palette, referenced by index from segment color lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    colors: [Rgb; 6],
}

impl Palette {
    pub const LEN: usize = 6;

    #[must_use]
    pub fn new(colors: [Rgb; 6]) -> Self {
        Self { colors }
    }

    /// Six pure whites, the default palette used when a scene's
    /// `current_palette_id` does not resolve.
    #[must_use]
    pub fn white() -> Self {
        Self {
            colors: [Rgb::new(255, 255, 255); 6],
        }
    }

    /// Returns the color at `index`, or black when out of range; the
    /// segment color-synthesis rule never fails.
    #[must_use]
    pub fn get(&self, index: i64) -> Rgb {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.colors.get(i).copied())
            .unwrap_or(Rgb::BLACK)
    }

    /// Writes a single color slot, clamping channels to `[0, 255]`. `u8`
    /// inputs are already clamped by construction; this accepts signed
    /// integers so callers (the control protocol) can clamp out-of-range
    /// values rather than reject them.
    pub fn set(&mut self, index: usize, r: i32, g: i32, b: i32) -> bool {
        let Some(slot) = self.colors.get_mut(index) else {
            return false;
        };
        let clamp = |v: i32| -> u8 { v.clamp(0, 255) as u8 };
        *slot = Rgb::new(clamp(r), clamp(g), clamp(b));
        true
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb; 6] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::white()
    }
}
