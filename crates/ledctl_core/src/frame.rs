//! The composited per-LED output buffer.

use crate::color::Rgb;

/// An ordered sequence of RGB triples, one per physical LED.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pixels: Vec<Rgb>,
}

impl Frame {
    /// A black frame of `led_count` pixels.
    #[must_use]
    pub fn black(led_count: usize) -> Self {
        Self {
            pixels: vec![Rgb::BLACK; led_count],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Channel-wise max-composites `colors` into this frame starting at
    /// `start` (which may be negative or run past the end). LEDs falling
    /// outside `[0, len())` are dropped.
    pub fn composite_max_at(&mut self, start: i64, colors: &[Rgb]) {
        for (i, color) in colors.iter().enumerate() {
            let Ok(index) = usize::try_from(start + i as i64) else {
                continue;
            };
            if let Some(slot) = self.pixels.get_mut(index) {
                *slot = slot.max(*color);
            }
        }
    }

    /// Scales every pixel by `factor`, rounding to the nearest integer
    /// (used by the pattern-transition fade).
    #[must_use]
    pub fn scale_round(&self, factor: f32) -> Self {
        Self {
            pixels: self.pixels.iter().map(|c| c.scale_round(factor)).collect(),
        }
    }

    /// Scales every pixel by `num / den` with integer truncation (the
    /// master-brightness post-process).
    #[must_use]
    pub fn scale_truncate(&self, num: u32, den: u32) -> Self {
        Self {
            pixels: self
                .pixels
                .iter()
                .map(|c| c.scale_truncate(num, den))
                .collect(),
        }
    }
}
