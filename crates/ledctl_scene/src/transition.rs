//! The pattern-transition state machine.

use std::time::{Duration, Instant};

use ledctl_core::{Frame, Palette, PaletteId};

use crate::scene::Scene;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPhase {
    FadeOut,
    Waiting,
    FadeIn,
    Completed,
}

/// Timed three-phase crossfade between two `(effect, palette)` selections.
#[derive(Debug, Clone)]
pub struct PatternTransition {
    pub from_effect_id: Option<u32>,
    pub from_palette_id: Option<PaletteId>,
    pub to_effect_id: u32,
    pub to_palette_id: Option<PaletteId>,
    pub phase: TransitionPhase,
    pub fade_in_ms: u64,
    pub fade_out_ms: u64,
    pub waiting_ms: u64,
    phase_start: Instant,
    pub progress: f32,
}

impl PatternTransition {
    pub fn start(
        scene: &Scene,
        to_effect_id: u32,
        to_palette_id: Option<PaletteId>,
        fade_out_ms: u64,
        waiting_ms: u64,
        fade_in_ms: u64,
        now: Instant,
    ) -> Self {
        Self {
            from_effect_id: scene.current_effect_id,
            from_palette_id: scene.current_palette_id,
            to_effect_id,
            to_palette_id,
            phase: TransitionPhase::FadeOut,
            fade_in_ms,
            fade_out_ms,
            waiting_ms,
            phase_start: now,
            progress: 1.0,
        }
    }

    fn enter_phase(&mut self, phase: TransitionPhase, now: Instant) {
        self.phase = phase;
        self.phase_start = now;
    }

    /// Advances the state machine. Returns `true` exactly when this call
    /// transitioned into [`TransitionPhase::Completed`]; the caller
    /// (`SceneManager`) uses this to commit `to_*` into the scene.
    pub fn advance(&mut self, now: Instant) -> bool {
        let elapsed_ms = now.saturating_duration_since(self.phase_start).as_millis() as u64;
        match self.phase {
            TransitionPhase::FadeOut => {
                if elapsed_ms >= self.fade_out_ms {
                    self.enter_phase(TransitionPhase::Waiting, now);
                    self.progress = 0.0;
                } else if self.fade_out_ms == 0 {
                    self.progress = 0.0;
                } else {
                    self.progress = 1.0 - (elapsed_ms as f32 / self.fade_out_ms as f32);
                }
                false
            }
            TransitionPhase::Waiting => {
                if elapsed_ms >= self.waiting_ms {
                    self.enter_phase(TransitionPhase::FadeIn, now);
                }
                self.progress = 0.0;
                false
            }
            TransitionPhase::FadeIn => {
                if elapsed_ms >= self.fade_in_ms {
                    self.enter_phase(TransitionPhase::Completed, now);
                    self.progress = 1.0;
                    true
                } else if self.fade_in_ms == 0 {
                    self.progress = 1.0;
                    false
                } else {
                    self.progress = elapsed_ms as f32 / self.fade_in_ms as f32;
                    false
                }
            }
            TransitionPhase::Completed => false,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != TransitionPhase::Completed
    }

    /// Renders the frame for the current phase. `render` composites a
    /// given `(effect_id, palette)` pair against `scene`.
    pub fn render(
        &self,
        scene: &Scene,
        led_count: usize,
        render: impl Fn(&Scene, u32, &Palette) -> Option<Frame>,
    ) -> Frame {
        match self.phase {
            TransitionPhase::FadeOut => self
                .from_effect_id
                .and_then(|id| {
                    let palette = self
                        .from_palette_id
                        .and_then(|pid| scene.palettes.get(&pid).cloned())
                        .unwrap_or_else(Palette::white);
                    render(scene, id, &palette)
                })
                .map(|f| f.scale_round(self.progress))
                .unwrap_or_else(|| Frame::black(led_count)),
            TransitionPhase::Waiting => Frame::black(led_count),
            TransitionPhase::FadeIn => {
                let palette = self
                    .to_palette_id
                    .and_then(|pid| scene.palettes.get(&pid).cloned())
                    .unwrap_or_else(Palette::white);
                render(scene, self.to_effect_id, &palette)
                    .map(|f| f.scale_round(self.progress))
                    .unwrap_or_else(|| Frame::black(led_count))
            }
            TransitionPhase::Completed => Frame::black(led_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledctl_core::Effect;
    use std::collections::{BTreeMap, HashMap};

    fn scene_with(effect_id: u32) -> Scene {
        let mut effects = HashMap::new();
        effects.insert(
            effect_id,
            Effect {
                id: effect_id,
                led_count: 4,
                fps: 60,
                segments: BTreeMap::new(),
                time: 0.0,
            },
        );
        Scene {
            id: 1,
            effects,
            palettes: HashMap::new(),
            current_effect_id: Some(effect_id),
            current_palette_id: None,
        }
    }

    #[test]
    fn phases_advance_monotonically_and_commit() {
        let scene = scene_with(1);
        let start = Instant::now();
        let mut t = PatternTransition::start(&scene, 2, None, 100, 50, 100, start);

        assert_eq!(t.phase, TransitionPhase::FadeOut);
        assert!(!t.advance(start + Duration::from_millis(50)));
        assert!((t.progress - 0.5).abs() < 0.05);

        assert!(!t.advance(start + Duration::from_millis(120)));
        assert_eq!(t.phase, TransitionPhase::Waiting);

        assert!(!t.advance(start + Duration::from_millis(200)));
        assert_eq!(t.phase, TransitionPhase::FadeIn);

        assert!(!t.advance(start + Duration::from_millis(250)));
        assert!((t.progress - 0.5).abs() < 0.05);

        assert!(t.advance(start + Duration::from_millis(300)));
        assert_eq!(t.phase, TransitionPhase::Completed);
    }
}
