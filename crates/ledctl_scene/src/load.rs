//! Scene file parsing: shape-probing between the single-scene and
//! multi-scene JSON root shapes.

use std::collections::{BTreeMap, HashMap};

use ledctl_core::{CoreError, Effect, Palette, PaletteId, Rgb, Segment};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, SceneError};
use crate::scene::Scene;

#[derive(Debug, Deserialize)]
struct RawSegment {
    #[serde(rename = "segment_ID")]
    segment_id: u32,
    color: Vec<i64>,
    #[serde(default)]
    transparency: Vec<f32>,
    #[serde(default)]
    length: Vec<u32>,
    #[serde(default)]
    move_speed: f32,
    move_range: [f32; 2],
    initial_position: f32,
    current_position: Option<f32>,
    #[serde(default = "default_true")]
    is_edge_reflect: bool,
    #[serde(default)]
    dimmer_time: Vec<f32>,
    #[serde(default = "default_ratio")]
    dimmer_time_ratio: f32,
    #[serde(default)]
    gradient: bool,
    #[serde(default)]
    gradient_colors: Vec<f32>,
    #[serde(default)]
    fade: bool,
}

fn default_true() -> bool {
    true
}

fn default_ratio() -> f32 {
    1.0
}

/// Builds and validates a [`Segment`] from its raw JSON form. Rejects a
/// segment whose `length` names more parts than `color` has entries, or
/// whose `move_range` is not well-ordered.
fn convert_segment(raw: RawSegment) -> Result<Segment> {
    let current_position = raw.current_position.unwrap_or(raw.initial_position);
    let segment = Segment {
        id: raw.segment_id,
        color: raw.color,
        transparency: raw.transparency,
        length: raw.length,
        move_speed: raw.move_speed,
        move_range: (raw.move_range[0], raw.move_range[1]),
        initial_position: raw.initial_position,
        current_position,
        is_edge_reflect: raw.is_edge_reflect,
        dimmer_time: raw.dimmer_time,
        dimmer_time_ratio: raw.dimmer_time_ratio,
        gradient: raw.gradient,
        gradient_colors: raw.gradient_colors,
        fade: raw.fade,
    };
    segment.validate()?;
    Ok(segment)
}

#[derive(Debug, Deserialize)]
struct RawEffect {
    #[serde(rename = "effect_ID")]
    effect_id: u32,
    led_count: usize,
    #[serde(default)]
    fps: u32,
    #[serde(default)]
    time: f32,
    segments: HashMap<String, RawSegment>,
}

/// Builds and validates an [`Effect`] from its raw JSON form. Rejects a
/// duplicate segment id within the effect, since the raw format keys
/// segments by a separate JSON object key that need not match
/// `segment_ID`.
fn convert_effect(raw: RawEffect) -> Result<Effect> {
    let mut segments: BTreeMap<u32, Segment> = BTreeMap::new();
    for raw_segment in raw.segments.into_values() {
        let segment = convert_segment(raw_segment)?;
        let id = segment.id;
        if segments.insert(id, segment).is_some() {
            return Err(CoreError::DuplicateSegmentId(id).into());
        }
    }
    Ok(Effect {
        id: raw.effect_id,
        led_count: raw.led_count,
        fps: raw.fps,
        segments,
        time: raw.time,
    })
}

#[derive(Debug, Deserialize)]
struct RawScene {
    #[serde(rename = "scene_ID")]
    scene_id: u32,
    #[serde(rename = "current_effect_ID")]
    current_effect_id: u32,
    current_palette: String,
    palettes: HashMap<String, [[u8; 3]; 6]>,
    effects: HashMap<String, RawEffect>,
}

fn convert_scene(raw: RawScene) -> Result<Scene> {
    let palettes: HashMap<PaletteId, Palette> = raw
        .palettes
        .into_iter()
        .map(|(k, rows)| {
            let id = PaletteId::parse(&k)
                .ok_or_else(|| SceneError::UnrecognizedShape(format!("bad palette id {k:?}")))?;
            let colors = rows.map(|[r, g, b]| Rgb::new(r, g, b));
            Ok((id, Palette::new(colors)))
        })
        .collect::<Result<_>>()?;

    let current_palette_id = PaletteId::parse(&raw.current_palette);

    let effects: HashMap<u32, Effect> = raw
        .effects
        .into_values()
        .map(|e| {
            let id = e.effect_id;
            Ok((id, convert_effect(e)?))
        })
        .collect::<Result<_>>()?;

    Ok(Scene {
        id: raw.scene_id,
        effects,
        palettes,
        current_effect_id: Some(raw.current_effect_id),
        current_palette_id,
    })
}

/// Parses `text` into one or more [`Scene`]s by probing the top-level JSON
/// keys rather than speculatively trying each shape in turn: a `scene_ID`
/// key means a single-scene object, a `scenes` key means a multi-scene
/// object.
pub fn parse_scene_file(text: &str) -> Result<Vec<Scene>> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(ref map) = value else {
        return Err(SceneError::UnrecognizedShape(
            "scene file root is not a JSON object".to_string(),
        ));
    };

    if map.contains_key("scene_ID") {
        log::debug!("scene file root has a 'scene_ID' key, parsing as a single scene");
        let raw: RawScene = serde_json::from_value(value)?;
        return Ok(vec![convert_scene(raw)?]);
    }

    if let Some(scenes) = map.get("scenes") {
        log::debug!("scene file root has a 'scenes' key, parsing as a scene array");
        let raws: Vec<RawScene> = serde_json::from_value(scenes.clone())?;
        if raws.is_empty() {
            return Err(SceneError::UnrecognizedShape(
                "'scenes' array is empty".to_string(),
            ));
        }
        return raws.into_iter().map(convert_scene).collect();
    }

    Err(SceneError::UnrecognizedShape(
        "expected a 'scene_ID' or 'scenes' root key".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_single() -> &'static str {
        r#"{
            "scene_ID": 1,
            "current_effect_ID": 1,
            "current_palette": "A",
            "palettes": { "A": [[200,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0]] },
            "effects": {
                "1": {
                    "effect_ID": 1,
                    "led_count": 4,
                    "fps": 60,
                    "time": 0,
                    "segments": {
                        "1": {
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
                        }
                    }
                }
            }
        }"#
    }

    #[test]
    fn single_scene_shape_parses() {
        let scenes = parse_scene_file(sample_single()).unwrap();
        assert_eq!(scenes.len(), 1);
        assert_eq!(scenes[0].id, 1);
        assert_eq!(scenes[0].effects[&1].led_count, 4);
    }

    #[test]
    fn multi_scene_shape_parses() {
        let wrapped = format!(r#"{{ "scenes": [{}] }}"#, sample_single());
        let scenes = parse_scene_file(&wrapped).unwrap();
        assert_eq!(scenes.len(), 1);
    }

    #[test]
    fn unrecognized_shape_is_rejected() {
        let err = parse_scene_file(r#"{ "foo": 1 }"#).unwrap_err();
        assert!(matches!(err, SceneError::UnrecognizedShape(_)));
    }

    #[test]
    fn segment_with_length_exceeding_color_is_rejected() {
        let text = sample_single().replace(r#""color": [0],"#, r#""color": [],"#);
        let err = parse_scene_file(&text).unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidSegment(ledctl_core::CoreError::SegmentLengthExceedsColor { .. })
        ));
    }

    #[test]
    fn segment_with_degenerate_move_range_is_rejected() {
        let text = sample_single().replace(r#""move_range": [0, 9],"#, r#""move_range": [9, 9],"#);
        let err = parse_scene_file(&text).unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidSegment(ledctl_core::CoreError::InvalidMoveRange { .. })
        ));
    }

    #[test]
    fn duplicate_segment_id_within_an_effect_is_rejected() {
        let mut value: serde_json::Value = serde_json::from_str(sample_single()).unwrap();
        value["effects"]["1"]["segments"]["2"] = value["effects"]["1"]["segments"]["1"].clone();
        let err = parse_scene_file(&value.to_string()).unwrap_err();
        assert!(matches!(
            err,
            SceneError::InvalidSegment(ledctl_core::CoreError::DuplicateSegmentId(1))
        ));
    }
}
