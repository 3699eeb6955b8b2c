//! Settings, a `#[serde(default)]` record loaded from an optional JSON
//! file, in the spirit of `myth_render::settings::RendererSettings`.

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub enabled: bool,
    pub default_fade_in_ms: u64,
    pub default_fade_out_ms: u64,
    pub default_waiting_ms: u64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            default_fade_in_ms: 100,
            default_fade_out_ms: 100,
            default_waiting_ms: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub target_fps: u32,
    pub led_count: usize,
    pub master_brightness: u8,
    pub dissolve_time_ms: u64,
    pub inbound_addr: SocketAddr,
    pub outbound_destinations: Vec<SocketAddr>,
    pub output_control_address: String,
    pub scene_directory: String,
    pub transition: TransitionSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_fps: 60,
            led_count: 225,
            master_brightness: 255,
            dissolve_time_ms: 1000,
            inbound_addr: "127.0.0.1:8000".parse().expect("valid literal"),
            outbound_destinations: Vec::new(),
            output_control_address: "/light/serial".to_string(),
            scene_directory: "scenes".to_string(),
            transition: TransitionSettings::default(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults for any key
    /// the file omits. A missing file is not an error; it is treated the
    /// same as an empty settings object.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "no config file at {}, using built-in defaults",
                    path.display()
                );
                Ok(Self::default())
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json")).unwrap();
        assert_eq!(settings.target_fps, 60);
        assert_eq!(settings.led_count, 225);
    }

    #[test]
    fn partial_json_fills_remaining_fields_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "target_fps": 30 }"#).unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.target_fps, 30);
        assert_eq!(settings.led_count, 225);
        assert!(!settings.transition.enabled);
    }
}
