//! `Engine`, the real-time frame loop. Runs on a dedicated
//! `std::thread::spawn` worker, outside any async runtime, so the render
//! cadence never depends on the tokio scheduler.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use ledctl_core::Frame;

use crate::state::EngineState;
use crate::timing::{FpsCounter, Timer};

/// The frame loop. Owns nothing that outlives the render thread except
/// the shared state and a channel to hand off finished frames; the
/// actual network send happens off-thread. No frame is ever dropped
/// silently: if the output task falls behind, the handoff backpressures
/// the render thread instead.
pub struct Engine {
    state: Arc<Mutex<EngineState>>,
    frame_tx: tokio::sync::mpsc::Sender<Frame>,
    running: Arc<AtomicBool>,
    target_fps: u32,
    timer: Timer,
    fps_counter: FpsCounter,
}

impl Engine {
    #[must_use]
    pub fn new(
        state: Arc<Mutex<EngineState>>,
        frame_tx: tokio::sync::mpsc::Sender<Frame>,
        running: Arc<AtomicBool>,
        target_fps: u32,
    ) -> Self {
        Self {
            state,
            frame_tx,
            running,
            target_fps,
            timer: Timer::new(),
            fps_counter: FpsCounter::new(),
        }
    }

    /// Spawns the frame loop on its own OS thread and returns its join
    /// handle. The loop exits within one tick of `running` flipping to
    /// `false`.
    pub fn spawn(mut self) -> std::thread::JoinHandle<()> {
        std::thread::spawn(move || self.run())
    }

    fn run(&mut self) {
        let frame_interval = Duration::from_secs_f64(1.0 / f64::from(self.target_fps.max(1)));

        while self.running.load(Ordering::Relaxed) {
            let frame_start = Instant::now();
            self.timer.tick();
            let dt = self.timer.dt_seconds();

            let frame = {
                let mut state = self.state.lock();
                let scaled_dt = dt * state.speed_percent as f32 / 100.0;
                state
                    .scene_manager
                    .update_animation(scaled_dt, Instant::now());
                let mut frame = state.scene_manager.get_led_output();
                if state.master_brightness < 255 {
                    frame = frame.scale_truncate(u32::from(state.master_brightness), 255);
                }
                frame
            };

            if let Err(err) = self.frame_tx.blocking_send(frame) {
                log::warn!("output channel closed, frame dropped: {err}");
            }

            self.fps_counter.record(frame_start.elapsed());

            let elapsed = frame_start.elapsed();
            if elapsed > frame_interval.mul_f32(1.5) {
                log::warn!(
                    "frame loop overrun: {:?} (target {:?})",
                    elapsed,
                    frame_interval
                );
            }
            if elapsed < frame_interval {
                std::thread::sleep(frame_interval - elapsed);
            }
        }
    }

    #[must_use]
    pub fn current_fps(&self) -> f32 {
        self.fps_counter.current_fps()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledctl_scene::TransitionConfig;

    #[test]
    fn master_brightness_255_is_a_no_op() {
        let frame = Frame::black(4);
        let scaled = frame.clone().scale_truncate(255, 255);
        assert_eq!(frame, scaled);
    }

    #[test]
    fn engine_runs_one_tick_and_produces_a_frame() {
        let state = Arc::new(Mutex::new(EngineState::new(
            4,
            255,
            1000,
            TransitionConfig::default(),
        )));
        let (tx, mut rx) = tokio::sync::mpsc::channel(4);
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = Arc::clone(&running);

        let mut engine = Engine::new(state, tx, running, 1000);
        std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(5));
            running_clone.store(false, Ordering::Relaxed);
        });
        engine.run();

        let frame = rx.try_recv();
        assert!(frame.is_ok());
    }
}
