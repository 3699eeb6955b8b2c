//! Process entry point: logging init, config load, and engine startup.
//!
//! No CLI argument parser is pulled in: this accepts a single optional
//! positional argument (a path to the settings file) via
//! `std::env::args()`, matching `RendererSettings`-style ambient config
//! loading.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ledctl::Settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from("config/settings.json"), PathBuf::from);

    let settings = Settings::load(&config_path)?;
    log::info!(
        "starting ledctl: fps={} led_count={} inbound={}",
        settings.target_fps,
        settings.led_count,
        settings.inbound_addr
    );

    let running = Arc::new(AtomicBool::new(true));
    let ctrlc_running = Arc::clone(&running);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("received shutdown signal");
            ctrlc_running.store(false, Ordering::Relaxed);
        }
    });

    runtime.block_on(ledctl::run(settings, running)).map_err(|err| {
        log::error!("fatal error: {err}");
        Box::<dyn std::error::Error>::from(err)
    })
}
