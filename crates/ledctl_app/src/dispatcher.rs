//! `ControlDispatcher`, the inbound UDP control-plane worker. Owns a
//! tokio multi-thread runtime task: parse synchronously, submit the
//! handler to a `Semaphore`-bounded pool, soft-timeout it.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tokio::net::UdpSocket;
use tokio::sync::Semaphore;

use ledctl_proto::Command;

use crate::state::EngineState;

const MAX_DATAGRAM: usize = 65_507;
const HANDLER_POOL_SIZE: usize = 4;
const SOFT_HANDLER_TIMEOUT: Duration = Duration::from_secs(5);

/// Listens on `bind_addr` and dispatches every inbound datagram onto a
/// bounded worker pool. Runs until `running` flips to `false`.
pub async fn run(
    bind_addr: SocketAddr,
    state: Arc<Mutex<EngineState>>,
    running: Arc<AtomicBool>,
    scene_directory: String,
) -> std::io::Result<()> {
    let socket = Arc::new(UdpSocket::bind(bind_addr).await?);
    let permits = Arc::new(Semaphore::new(HANDLER_POOL_SIZE));
    log::info!("control dispatcher listening on {bind_addr}");

    let mut buf = vec![0u8; MAX_DATAGRAM];
    while running.load(Ordering::Relaxed) {
        let recv = tokio::time::timeout(Duration::from_millis(200), socket.recv_from(&mut buf)).await;
        let (len, _peer) = match recv {
            Ok(Ok(pair)) => pair,
            Ok(Err(err)) => {
                log::warn!("control socket recv error: {err}");
                continue;
            }
            Err(_) => continue,
        };
        let datagram = buf[..len].to_vec();

        let state = Arc::clone(&state);
        let permits = Arc::clone(&permits);
        let scene_directory = scene_directory.clone();
        tokio::spawn(async move {
            let Ok(permit) = permits.acquire_owned().await else {
                return;
            };
            let start = Instant::now();
            let result = tokio::time::timeout(
                SOFT_HANDLER_TIMEOUT,
                handle_datagram(&datagram, &state, &scene_directory),
            )
            .await;
            drop(permit);
            match result {
                Ok(()) => {}
                Err(_) => {
                    log::warn!(
                        "control handler exceeded soft timeout of {SOFT_HANDLER_TIMEOUT:?} (ran {:?})",
                        start.elapsed()
                    );
                }
            }
        });
    }
    Ok(())
}

/// Parses and applies one inbound datagram. Malformed-input and
/// unknown-target failures are logged here and never propagate;
/// handlers never throw back to the dispatch loop.
async fn handle_datagram(datagram: &[u8], state: &Arc<Mutex<EngineState>>, scene_directory: &str) {
    let (address, args) = match ledctl_proto::decode(datagram) {
        Ok(parsed) => parsed,
        Err(err) => {
            log::warn!("malformed control datagram: {err}");
            return;
        }
    };

    let command = match ledctl_proto::parse(&address, &args) {
        Ok(cmd) => cmd,
        Err(err) => {
            log::warn!("rejected control message {address}: {err}");
            return;
        }
    };

    apply(command, state, scene_directory).await;
}

async fn apply(command: Command, state: &Arc<Mutex<EngineState>>, scene_directory: &str) {
    match command {
        Command::LoadJson(path) => load_json(&path, state, scene_directory).await,
        Command::ChangeScene(scene_id) => {
            if let Err(err) = state.lock().scene_manager.switch_scene(scene_id) {
                log::warn!("change_scene({scene_id}) failed: {err}");
            }
        }
        Command::ChangeEffect(effect_id) => {
            if let Err(err) = state
                .lock()
                .scene_manager
                .set_effect(effect_id, Instant::now())
            {
                log::warn!("change_effect({effect_id}) failed: {err}");
            }
        }
        Command::ChangePalette(palette_id) => {
            if let Err(err) = state
                .lock()
                .scene_manager
                .set_palette(palette_id, Instant::now())
            {
                log::warn!("change_palette({palette_id}) failed: {err}");
            }
        }
        Command::UpdatePaletteColor {
            palette_id,
            color_id,
            r,
            g,
            b,
        } => {
            if let Err(err) = state
                .lock()
                .scene_manager
                .update_palette_color(palette_id, color_id, r, g, b)
            {
                log::warn!("update_palette_color({palette_id}, {color_id}) failed: {err}");
            }
        }
        Command::SetDissolveTime(ms) => {
            state.lock().dissolve_time_ms = ms;
        }
        Command::SetSpeedPercent(percent) => {
            state.lock().speed_percent = percent;
        }
        Command::MasterBrightness(level) => {
            state.lock().master_brightness = level;
        }
    }
}

/// `/load_json`. Scene shape (single scene vs. a scene array) is
/// resolved by probing the `scene_ID` vs. `scenes` root key directly off
/// the loaded JSON, so there is no need to guess from the filename.
async fn load_json(path: &str, state: &Arc<Mutex<EngineState>>, scene_directory: &str) {
    let full_path = std::path::Path::new(scene_directory).join(path);
    let text = match tokio::fs::read_to_string(&full_path).await {
        Ok(text) => text,
        Err(err) => {
            log::error!("load_json({path}) I/O error: {err}");
            return;
        }
    };

    match state.lock().scene_manager.load_scene_text(&text) {
        Ok(count) => log::info!("load_json({path}) loaded {count} scene(s)"),
        Err(err) => log::error!("load_json({path}) failed: {err}"),
    }
}
