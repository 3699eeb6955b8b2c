//! Effect: single-frame composition of a set of segments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Palette;
use crate::frame::Frame;
use crate::segment::Segment;

/// A set of segments plus the logic to composite them into a fixed-length
/// LED frame by channel-wise maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub id: u32,
    pub led_count: usize,
    /// Frame-rate hint; purely informational.
    #[serde(default)]
    pub fps: u32,
    pub segments: BTreeMap<u32, Segment>,
    /// Monotonic, purely informational time accumulator.
    #[serde(default)]
    pub time: f32,
}

impl Effect {
    /// Advances every segment's position and the effect's `time`
    /// accumulator by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        for segment in self.segments.values_mut() {
            segment.update_position(dt);
        }
        self.time += dt;
    }

    /// Composites every segment onto a fresh `led_count`-length frame using
    /// channel-wise maximum. Pure function of `(self, palette)`: segment
    /// `current_position` is the only mutable state it reads. Composition
    /// is order-independent by construction, since `max` commutes and
    /// associates.
    #[must_use]
    pub fn composite(&self, palette: &Palette) -> Frame {
        let mut frame = Frame::black(self.led_count);
        for segment in self.segments.values() {
            let colors = segment.led_colors(palette);
            let start = segment.current_position.floor() as i64;
            frame.composite_max_at(start, &colors);
        }
        frame
    }
}
