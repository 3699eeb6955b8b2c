//! Frame timing: a `Timer` tracking delta/elapsed/frame-count (grounded on
//! `myth::utils::time::Timer`) and a rolling 60-frame `FpsCounter`
//! (grounded on `myth::utils::fps_counter::FpsCounter`, adapted from its
//! 1-second wall-clock window to a fixed 60-sample window).

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Tracks per-tick delta time and total elapsed time since creation.
pub struct Timer {
    start_time: Instant,
    last_tick: Instant,
    pub delta: Duration,
    pub elapsed: Duration,
    pub frame_count: u64,
}

impl Timer {
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_tick: now,
            delta: Duration::ZERO,
            elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn tick(&mut self) {
        let now = Instant::now();
        self.delta = now - self.last_tick;
        self.elapsed = now - self.start_time;
        self.last_tick = now;
        self.frame_count += 1;
    }

    #[must_use]
    pub fn dt_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

const WINDOW: usize = 60;

/// A ring buffer over the last 60 frame durations, a fixed sample-count
/// window rather than a wall-clock one.
pub struct FpsCounter {
    samples: VecDeque<Duration>,
}

impl FpsCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(WINDOW),
        }
    }

    /// Records one frame's duration, evicting the oldest sample once the
    /// window is full.
    pub fn record(&mut self, frame_time: Duration) {
        if self.samples.len() == WINDOW {
            self.samples.pop_front();
        }
        self.samples.push_back(frame_time);
    }

    /// The current rolling-average FPS, or `0.0` until at least one
    /// sample has been recorded.
    #[must_use]
    pub fn current_fps(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let total: Duration = self.samples.iter().sum();
        self.samples.len() as f32 / total.as_secs_f32()
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_counter_reports_zero_before_any_samples() {
        let counter = FpsCounter::new();
        assert_eq!(counter.current_fps(), 0.0);
    }

    #[test]
    fn fps_counter_reports_steady_rate() {
        let mut counter = FpsCounter::new();
        for _ in 0..WINDOW {
            counter.record(Duration::from_millis(16));
        }
        let fps = counter.current_fps();
        assert!((fps - 62.5).abs() < 1.0, "got {fps}");
    }

    #[test]
    fn fps_counter_evicts_oldest_past_the_window() {
        let mut counter = FpsCounter::new();
        for _ in 0..WINDOW {
            counter.record(Duration::from_millis(16));
        }
        counter.record(Duration::from_secs(1));
        assert_eq!(counter.samples.len(), WINDOW);
    }
}
