//! `EngineState`, everything the frame loop and the control dispatcher
//! share behind one coarse lock.

use ledctl_scene::{SceneManager, TransitionConfig};

/// All mutable engine state: the scene table (via `SceneManager`) plus the
/// global playback knobs. Guarded as a whole by a single
/// `parking_lot::Mutex`; this type performs no locking itself.
pub struct EngineState {
    pub scene_manager: SceneManager,
    pub master_brightness: u8,
    pub speed_percent: u32,
    pub dissolve_time_ms: u64,
}

impl EngineState {
    #[must_use]
    pub fn new(default_led_count: usize, master_brightness: u8, dissolve_time_ms: u64, transition_config: TransitionConfig) -> Self {
        Self {
            scene_manager: SceneManager::new(default_led_count, transition_config),
            master_brightness,
            speed_percent: 100,
            dissolve_time_ms,
        }
    }
}
