//! Segment kinematics and per-LED color synthesis.

use serde::{Deserialize, Serialize};

use crate::color::{Palette, Rgb};
use crate::error::{CoreError, Result};

/// The minimum `|move_speed|` below which a segment is considered
/// stationary for a tick.
const STATIONARY_EPSILON: f32 = 1e-3;

/// A movable, multi-part colored structure painting consecutive LEDs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    /// Palette index per part (and per trailing extra color).
    pub color: Vec<i64>,
    /// Opacity per part, in `[0, 1]`. Missing trailing entries default to 1.0.
    #[serde(default)]
    pub transparency: Vec<f32>,
    /// LED count per part.
    #[serde(default)]
    pub length: Vec<u32>,
    /// Signed LEDs/second.
    #[serde(default)]
    pub move_speed: f32,
    /// Inclusive `[lo, hi]` bounds on the movement axis.
    pub move_range: (f32, f32),
    pub initial_position: f32,
    pub current_position: f32,
    #[serde(default = "default_true")]
    pub is_edge_reflect: bool,
    /// Piecewise-linear brightness envelope, in percent (0..100+), sampled
    /// at `dimmer_time.len()` knots evenly spaced over `[0, 1]`.
    #[serde(default)]
    pub dimmer_time: Vec<f32>,
    /// Extra multiplier folded into the fade factor; defaults to a no-op.
    #[serde(default = "default_ratio")]
    pub dimmer_time_ratio: f32,
    #[serde(default)]
    pub gradient: bool,
    /// `[start_percent, end_percent]` brightness endpoints for the
    /// per-part gradient.
    #[serde(default)]
    pub gradient_colors: Vec<f32>,
    #[serde(default)]
    pub fade: bool,
}

fn default_true() -> bool {
    true
}

fn default_ratio() -> f32 {
    1.0
}

impl Segment {
    /// Checks this segment's structural invariants: `length` cannot name
    /// more parts than `color` has entries, and `move_range` must be a
    /// non-degenerate interval.
    pub fn validate(&self) -> Result<()> {
        if self.length.len() > self.color.len() {
            return Err(CoreError::SegmentLengthExceedsColor {
                segment_id: self.id,
                length_len: self.length.len(),
                color_len: self.color.len(),
            });
        }
        let (lo, hi) = self.move_range;
        if lo >= hi {
            return Err(CoreError::InvalidMoveRange {
                segment_id: self.id,
                lo,
                hi,
            });
        }
        Ok(())
    }

    /// Advances `current_position` by `move_speed * dt`, applying either
    /// reflecting or wrapping bound semantics.
    pub fn update_position(&mut self, dt: f32) {
        if self.move_speed.abs() < STATIONARY_EPSILON {
            return;
        }

        self.current_position += self.move_speed * dt;

        let (lo, hi) = self.move_range;
        if self.is_edge_reflect {
            if self.current_position <= lo {
                self.current_position = lo;
                self.move_speed = self.move_speed.abs();
            } else if self.current_position >= hi {
                self.current_position = hi;
                self.move_speed = -self.move_speed.abs();
            }
        } else {
            let range = hi - lo;
            if range > 0.0 {
                let offset = (self.current_position - lo).rem_euclid(range);
                self.current_position = lo + offset;
            }
        }
    }

    /// Resets `current_position` to `initial_position`.
    pub fn reset_position(&mut self) {
        self.current_position = self.initial_position;
    }

    /// `T = sum(max(0, length[i])) + max(0, color.len() - length.len())`.
    #[must_use]
    pub fn total_led_count(&self) -> usize {
        let part_total: usize = self.length.iter().map(|&l| l as usize).sum();
        let extra = self.color.len().saturating_sub(self.length.len());
        part_total + extra
    }

    fn transparency_at(&self, index: usize) -> f32 {
        self.transparency.get(index).copied().unwrap_or(1.0)
    }

    /// Normalized `[0, 1]` longitudinal brightness at LED ordinal `i_emit`
    /// out of `total`, sampling the piecewise-linear dimmer curve at
    /// `p = i_emit / (total - 1)` so the sample points pin to the
    /// segment's two endpoints.
    fn fade_factor(&self, i_emit: usize, total: usize) -> f32 {
        if !self.fade || total == 0 {
            return 1.0;
        }
        let knots = self.dimmer_time.len();
        let base = if knots <= 1 {
            self.dimmer_time.first().copied().unwrap_or(100.0) / 100.0
        } else {
            let p = if total > 1 {
                i_emit as f32 / (total - 1) as f32
            } else {
                0.0
            };
            let pos = p * (knots - 1) as f32;
            let index = pos.floor() as usize;
            let fraction = pos - pos.floor();
            if index >= knots - 1 {
                self.dimmer_time[knots - 1] / 100.0
            } else {
                let a = self.dimmer_time[index];
                let b = self.dimmer_time[index + 1];
                (a + (b - a) * fraction) / 100.0
            }
        };
        (base * self.dimmer_time_ratio).clamp(0.0, 1.0)
    }

    /// Per-part spatial gradient factor at LED ordinal `k` within a part
    /// of `part_len` LEDs.
    fn gradient_factor(&self, k: usize, part_len: u32) -> f32 {
        if !self.gradient || part_len <= 1 {
            return 1.0;
        }
        let start = self.gradient_colors.first().copied().unwrap_or(100.0) / 100.0;
        let end = self.gradient_colors.get(1).copied().unwrap_or(100.0) / 100.0;
        let g = k as f32 / (part_len - 1) as f32;
        (start + (end - start) * g).clamp(0.0, 1.0)
    }

    /// Synthesizes this segment's LED sequence against `palette`. The
    /// returned vector always has length [`Segment::total_led_count`].
    #[must_use]
    pub fn led_colors(&self, palette: &Palette) -> Vec<Rgb> {
        let total = self.total_led_count();
        let mut out = Vec::with_capacity(total);
        let mut i_emit = 0usize;

        for (part_index, &part_len) in self.length.iter().enumerate() {
            if part_len == 0 {
                continue;
            }
            let color_index = *self.color.get(part_index).unwrap_or(&0);
            let base = palette.get(color_index);
            let transparency = self.transparency_at(part_index);

            for k in 0..part_len {
                let fade = self.fade_factor(i_emit, total);
                let gradient = self.gradient_factor(k as usize, part_len);
                out.push(base.scale_round(transparency * fade * gradient));
                i_emit += 1;
            }
        }

        for extra_index in self.length.len()..self.color.len() {
            let color_index = self.color[extra_index];
            let base = palette.get(color_index);
            let transparency = self.transparency_at(extra_index);
            let fade = self.fade_factor(i_emit, total);
            out.push(base.scale_round(transparency * fade));
            i_emit += 1;
        }

        out
    }
}
