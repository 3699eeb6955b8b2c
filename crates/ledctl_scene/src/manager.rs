//! `SceneManager`, the mutation mediator and transition engine.

use std::collections::HashMap;
use std::time::Instant;

use ledctl_core::{Frame, PaletteId};

use crate::error::{Result, SceneError};
use crate::load::parse_scene_file;
use crate::scene::Scene;
use crate::transition::PatternTransition;

/// Default transition timings: 100ms fade out, 50ms black hold, 100ms
/// fade in (see `DESIGN.md` for where these numbers come from).
#[derive(Debug, Clone, Copy)]
pub struct TransitionConfig {
    pub enabled: bool,
    pub fade_out_ms: u64,
    pub waiting_ms: u64,
    pub fade_in_ms: u64,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            fade_out_ms: 100,
            waiting_ms: 50,
            fade_in_ms: 100,
        }
    }
}

/// Owns all loaded scenes, mediates all mutation, and runs the
/// pattern-transition state machine. Every method here is meant to run
/// under a single caller-held exclusive lock
/// (`ledctl_app::state::EngineState`); this type performs no internal
/// locking of its own.
pub struct SceneManager {
    scenes: HashMap<u32, Scene>,
    active_scene_id: Option<u32>,
    pub transition_config: TransitionConfig,
    transition: Option<PatternTransition>,
    default_led_count: usize,
}

impl SceneManager {
    #[must_use]
    pub fn new(default_led_count: usize, transition_config: TransitionConfig) -> Self {
        Self {
            scenes: HashMap::new(),
            active_scene_id: None,
            transition_config,
            transition: None,
            default_led_count,
        }
    }

    /// Parses `text` (the contents of a scene file) and inserts every
    /// scene found. The first scene loaded when none is active becomes
    /// active. Returns the number of scenes loaded. On any parse error,
    /// no state is mutated.
    pub fn load_scene_text(&mut self, text: &str) -> Result<usize> {
        let scenes = parse_scene_file(text)?;
        let count = scenes.len();
        for scene in scenes {
            let id = scene.id;
            self.scenes.insert(id, scene);
            if self.active_scene_id.is_none() {
                self.active_scene_id = Some(id);
            }
        }
        Ok(count)
    }

    pub fn switch_scene(&mut self, scene_id: u32) -> Result<()> {
        if !self.scenes.contains_key(&scene_id) {
            return Err(SceneError::UnknownTarget {
                kind: "scene",
                id: scene_id.to_string(),
            });
        }
        self.active_scene_id = Some(scene_id);
        Ok(())
    }

    fn active_scene(&self) -> Result<&Scene> {
        self.active_scene_id
            .and_then(|id| self.scenes.get(&id))
            .ok_or(SceneError::NoActiveScene)
    }

    fn active_scene_mut(&mut self) -> Result<&mut Scene> {
        let id = self.active_scene_id.ok_or(SceneError::NoActiveScene)?;
        self.scenes.get_mut(&id).ok_or(SceneError::NoActiveScene)
    }

    /// Sets the active scene's current effect (and optionally palette).
    /// When the pattern-transition feature is enabled, this starts a
    /// transition instead of committing immediately.
    pub fn set_effect(&mut self, effect_id: u32, now: Instant) -> Result<()> {
        if self.transition_config.enabled {
            let scene = self.active_scene()?;
            if !scene.effects.contains_key(&effect_id) {
                return Err(SceneError::UnknownTarget {
                    kind: "effect",
                    id: effect_id.to_string(),
                });
            }
            if self.transition.is_some() {
                // A transition is already in flight: refuse the new
                // request rather than queue or interrupt it.
                log::debug!("set_effect({effect_id}) refused, a transition is in flight");
                return Ok(());
            }
            self.transition = Some(PatternTransition::start(
                scene,
                effect_id,
                None,
                self.transition_config.fade_out_ms,
                self.transition_config.waiting_ms,
                self.transition_config.fade_in_ms,
                now,
            ));
            Ok(())
        } else {
            let scene = self.active_scene_mut()?;
            if scene.switch_effect(effect_id, None) {
                Ok(())
            } else {
                Err(SceneError::UnknownTarget {
                    kind: "effect",
                    id: effect_id.to_string(),
                })
            }
        }
    }

    /// Sets the active scene's current palette, same transition semantics
    /// as [`SceneManager::set_effect`].
    pub fn set_palette(&mut self, palette_id: PaletteId, now: Instant) -> Result<()> {
        if self.transition_config.enabled {
            let scene = self.active_scene()?;
            if !scene.palettes.contains_key(&palette_id) {
                return Err(SceneError::UnknownTarget {
                    kind: "palette",
                    id: palette_id.to_string(),
                });
            }
            if self.transition.is_some() {
                log::debug!("set_palette({palette_id}) refused, a transition is in flight");
                return Ok(());
            }
            let current_effect = scene.current_effect_id.ok_or(SceneError::NoActiveScene)?;
            self.transition = Some(PatternTransition::start(
                scene,
                current_effect,
                Some(palette_id),
                self.transition_config.fade_out_ms,
                self.transition_config.waiting_ms,
                self.transition_config.fade_in_ms,
                now,
            ));
            Ok(())
        } else {
            let scene = self.active_scene_mut()?;
            if !scene.palettes.contains_key(&palette_id) {
                return Err(SceneError::UnknownTarget {
                    kind: "palette",
                    id: palette_id.to_string(),
                });
            }
            scene.current_palette_id = Some(palette_id);
            Ok(())
        }
    }

    /// Writes a single palette color slot on the active scene, clamping
    /// channels to `[0, 255]`.
    pub fn update_palette_color(
        &mut self,
        palette_id: PaletteId,
        color_id: usize,
        r: i32,
        g: i32,
        b: i32,
    ) -> Result<()> {
        if color_id > 5 {
            return Err(SceneError::InvalidColorIndex(color_id));
        }
        let scene = self.active_scene_mut()?;
        let palette = scene
            .palettes
            .get_mut(&palette_id)
            .ok_or(SceneError::UnknownTarget {
                kind: "palette",
                id: palette_id.to_string(),
            })?;
        palette.set(color_id, r, g, b);
        Ok(())
    }

    /// Sets `|move_speed| = speed` for every segment of `scene_id`'s
    /// current effect, preserving each segment's direction sign. Not
    /// exposed over the control protocol; an internal operation other
    /// `SceneManager` callers may use directly.
    pub fn set_move_speed(&mut self, scene_id: u32, speed: f32) -> Result<()> {
        let scene = self
            .scenes
            .get_mut(&scene_id)
            .ok_or(SceneError::UnknownTarget {
                kind: "scene",
                id: scene_id.to_string(),
            })?;
        let effect = scene
            .current_effect_mut()
            .ok_or(SceneError::NoActiveScene)?;
        for segment in effect.segments.values_mut() {
            let sign = if segment.move_speed < 0.0 { -1.0 } else { 1.0 };
            segment.move_speed = sign * speed.abs();
        }
        Ok(())
    }

    /// Advances every effect of every scene (not only the active one, so
    /// paused scenes continue to evolve) and the pattern transition, if
    /// any.
    pub fn update_animation(&mut self, dt: f32, now: Instant) {
        for scene in self.scenes.values_mut() {
            for effect in scene.effects.values_mut() {
                effect.advance(dt);
            }
        }

        if let Some(transition) = &mut self.transition {
            if transition.advance(now) {
                if let Some(scene) = self.active_scene_id.and_then(|id| self.scenes.get_mut(&id))
                {
                    scene.current_effect_id = Some(transition.to_effect_id);
                    if transition.to_palette_id.is_some() {
                        scene.current_palette_id = transition.to_palette_id;
                    }
                }
                self.transition = None;
            }
        }
    }

    /// Returns the frame for this tick: the transition's frame if one is
    /// active, else the active scene's direct composite.
    #[must_use]
    pub fn get_led_output(&self) -> Frame {
        let Ok(scene) = self.active_scene() else {
            return Frame::black(self.default_led_count);
        };
        let led_count = scene.led_count().unwrap_or(self.default_led_count);

        if let Some(transition) = &self.transition {
            return transition.render(scene, led_count, |scene, effect_id, palette| {
                scene.effects.get(&effect_id).map(|e| e.composite(palette))
            });
        }

        scene
            .current_effect()
            .map(|e| e.composite(&scene.current_palette()))
            .unwrap_or_else(|| Frame::black(led_count))
    }

    #[must_use]
    pub fn active_scene_id(&self) -> Option<u32> {
        self.active_scene_id
    }

    #[must_use]
    pub fn get_scene(&self, scene_id: u32) -> Option<&Scene> {
        self.scenes.get(&scene_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_text() -> String {
        format!(
            r#"{{
                "scene_ID": 1,
                "current_effect_ID": 1,
                "current_palette": "A",
                "palettes": {{ "A": [[200,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0]] }},
                "effects": {{
                    "1": {{
                        "effect_ID": 1,
                        "led_count": 4,
                        "fps": 60,
                        "time": 0,
                        "segments": {{
                            "1": {{
                                "segment_ID": 1,
                                "color": [0],
                                "transparency": [1.0],
                                "length": [1],
                                "move_speed": 0,
                                "move_range": [0, 9],
                                "initial_position": 2,
                                "current_position": 2,
                                "is_edge_reflect": true,
                                "dimmer_time": [],
                                "gradient": false,
                                "gradient_colors": [],
                                "fade": false
                            }}
                        }}
                    }}
                }}
            }}"#
        )
    }

    #[test]
    fn first_loaded_scene_becomes_active() {
        let mut mgr = SceneManager::new(225, TransitionConfig::default());
        assert_eq!(mgr.load_scene_text(&sample_text()).unwrap(), 1);
        assert_eq!(mgr.active_scene_id(), Some(1));
    }

    #[test]
    fn single_static_led_scenario_end_to_end() {
        let mut mgr = SceneManager::new(225, TransitionConfig::default());
        mgr.load_scene_text(&sample_text()).unwrap();
        let frame = mgr.get_led_output();
        assert_eq!(frame.len(), 4);
        assert_eq!(frame.as_slice()[2], ledctl_core::Rgb::new(200, 0, 0));
    }

    #[test]
    fn switch_scene_rejects_unknown_id() {
        let mut mgr = SceneManager::new(225, TransitionConfig::default());
        mgr.load_scene_text(&sample_text()).unwrap();
        assert!(mgr.switch_scene(999).is_err());
        assert_eq!(mgr.active_scene_id(), Some(1));
    }

    #[test]
    fn set_effect_commits_immediately_when_transitions_disabled() {
        let mut mgr = SceneManager::new(225, TransitionConfig::default());
        let mut text = serde_json::from_str::<serde_json::Value>(&sample_text()).unwrap();
        text["effects"]["2"] = text["effects"]["1"].clone();
        text["effects"]["2"]["effect_ID"] = serde_json::json!(2);
        mgr.load_scene_text(&text.to_string()).unwrap();
        mgr.set_effect(2, Instant::now()).unwrap();
        assert_eq!(mgr.get_scene(1).unwrap().current_effect_id, Some(2));
    }
}
