//! Engine frame loop, control dispatcher, settings, and the process-level
//! orchestration that wires them together.

#![warn(clippy::all, clippy::pedantic)]

mod config;
mod dispatcher;
mod engine;
mod error;
mod state;
mod timing;

pub use config::{Settings, TransitionSettings};
pub use engine::Engine;
pub use error::{EngineError, Result};
pub use state::EngineState;
pub use timing::{FpsCounter, Timer};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ledctl_core::Frame;
use ledctl_output::OutputSink;
use ledctl_scene::TransitionConfig;
use parking_lot::Mutex;

/// Builds the shared engine state, spawns the frame-loop thread and the
/// output-forwarding task, and runs the control dispatcher until
/// `running` is flipped to `false` (e.g. by a Ctrl-C handler in `main`).
///
/// # Errors
///
/// Returns an error if the inbound socket cannot be bound or the output
/// sink cannot be created.
pub async fn run(settings: Settings, running: Arc<AtomicBool>) -> Result<()> {
    let transition_config = TransitionConfig {
        enabled: settings.transition.enabled,
        fade_out_ms: settings.transition.default_fade_out_ms,
        waiting_ms: settings.transition.default_waiting_ms,
        fade_in_ms: settings.transition.default_fade_in_ms,
    };

    let state = Arc::new(Mutex::new(EngineState::new(
        settings.led_count,
        settings.master_brightness,
        settings.dissolve_time_ms,
        transition_config,
    )));

    let sink = OutputSink::bind(
        settings.outbound_destinations.clone(),
        settings.output_control_address.clone(),
    )
    .await
    .map_err(EngineError::Init)?;

    let (frame_tx, mut frame_rx) = tokio::sync::mpsc::channel::<Frame>(2);
    tokio::spawn(async move {
        while let Some(frame) = frame_rx.recv().await {
            sink.send_frame(&frame).await;
        }
    });

    let engine = Engine::new(
        Arc::clone(&state),
        frame_tx,
        Arc::clone(&running),
        settings.target_fps,
    );
    let frame_loop = engine.spawn();

    dispatcher::run(
        settings.inbound_addr,
        state,
        Arc::clone(&running),
        settings.scene_directory.clone(),
    )
    .await
    .map_err(EngineError::Init)?;

    running.store(false, Ordering::Relaxed);
    if let Err(err) = frame_loop.join() {
        log::error!("frame loop thread panicked: {err:?}");
    }
    Ok(())
}
