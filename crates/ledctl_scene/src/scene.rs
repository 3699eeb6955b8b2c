//! Scene: a collection of effects and palettes with one of each marked
//! "current".

use std::collections::HashMap;

use ledctl_core::{Effect, Palette, PaletteId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: u32,
    pub effects: HashMap<u32, Effect>,
    #[serde(with = "palette_map")]
    pub palettes: HashMap<PaletteId, Palette>,
    pub current_effect_id: Option<u32>,
    pub current_palette_id: Option<PaletteId>,
}

impl Scene {
    /// The effect whose id equals `current_effect_id`, or `None`.
    #[must_use]
    pub fn current_effect(&self) -> Option<&Effect> {
        self.current_effect_id.and_then(|id| self.effects.get(&id))
    }

    pub fn current_effect_mut(&mut self) -> Option<&mut Effect> {
        self.current_effect_id
            .and_then(move |id| self.effects.get_mut(&id))
    }

    /// The palette keyed by `current_palette_id`, defaulting to six pure
    /// whites when it does not resolve so downstream rendering never fails.
    #[must_use]
    pub fn current_palette(&self) -> Palette {
        self.current_palette_id
            .and_then(|id| self.palettes.get(&id))
            .cloned()
            .unwrap_or_else(Palette::white)
    }

    /// Updates both selectors atomically if the targets exist; unknown
    /// targets are rejected without partial update.
    pub fn switch_effect(&mut self, effect_id: u32, palette_id: Option<PaletteId>) -> bool {
        if !self.effects.contains_key(&effect_id) {
            return false;
        }
        if let Some(pid) = palette_id {
            if !self.palettes.contains_key(&pid) {
                return false;
            }
            self.current_palette_id = Some(pid);
        }
        self.current_effect_id = Some(effect_id);
        true
    }

    #[must_use]
    pub fn led_count(&self) -> Option<usize> {
        self.current_effect().map(|e| e.led_count)
    }
}

/// `serde` adapter: `PaletteId` is a bare `char`, which doesn't serialize
/// as a JSON object key on its own, but scene files key palettes by a
/// single uppercase letter string.
mod palette_map {
    use std::collections::HashMap;

    use ledctl_core::{Palette, PaletteId};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(
        map: &HashMap<PaletteId, Palette>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let as_strings: HashMap<String, &Palette> =
            map.iter().map(|(k, v)| (k.0.to_string(), v)).collect();
        as_strings.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<PaletteId, Palette>, D::Error> {
        let raw: HashMap<String, Palette> = HashMap::deserialize(deserializer)?;
        raw.into_iter()
            .map(|(k, v)| {
                PaletteId::parse(&k)
                    .map(|id| (id, v))
                    .ok_or_else(|| serde::de::Error::custom(format!("invalid palette id {k:?}")))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn empty_scene() -> Scene {
        let mut effects = HashMap::new();
        effects.insert(
            1,
            Effect {
                id: 1,
                led_count: 4,
                fps: 60,
                segments: BTreeMap::new(),
                time: 0.0,
            },
        );
        let mut palettes = HashMap::new();
        palettes.insert(PaletteId('A'), Palette::white());

        Scene {
            id: 1,
            effects,
            palettes,
            current_effect_id: Some(1),
            current_palette_id: Some(PaletteId('A')),
        }
    }

    #[test]
    fn switch_effect_rejects_unknown_target_without_partial_update() {
        let mut scene = empty_scene();
        let before_effect = scene.current_effect_id;
        let before_palette = scene.current_palette_id;
        assert!(!scene.switch_effect(99, Some(PaletteId('A'))));
        assert_eq!(scene.current_effect_id, before_effect);
        assert_eq!(scene.current_palette_id, before_palette);
    }

    #[test]
    fn missing_palette_defaults_to_white() {
        let mut scene = empty_scene();
        scene.current_palette_id = Some(PaletteId('B'));
        assert_eq!(scene.current_palette(), Palette::white());
    }
}
