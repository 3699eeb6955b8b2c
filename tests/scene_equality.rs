//! Round-trip and idempotence properties that cut across `ledctl_core`
//! and `ledctl_scene`.

use ledctl::{PaletteId, Scene, SceneManager, TransitionConfig};

fn scene_json() -> &'static str {
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
fn serializing_a_loaded_scene_and_parsing_it_back_yields_an_equal_model() {
    let mut mgr = SceneManager::new(225, TransitionConfig::default());
    mgr.load_scene_text(scene_json()).unwrap();
    let scene = mgr.get_scene(1).unwrap().clone();

    let encoded = serde_json::to_string(&scene).unwrap();
    let decoded: Scene = serde_json::from_str(&encoded).unwrap();

    assert_eq!(scene, decoded);
}

#[test]
fn update_palette_color_is_idempotent_and_last_write_wins() {
    let mut mgr = SceneManager::new(225, TransitionConfig::default());
    mgr.load_scene_text(scene_json()).unwrap();

    mgr.update_palette_color(PaletteId('A'), 0, 10, 20, 30)
        .unwrap();
    mgr.update_palette_color(PaletteId('A'), 0, 10, 20, 30)
        .unwrap();
    let after_repeat = mgr.get_scene(1).unwrap().palettes[&PaletteId('A')].clone();

    mgr.update_palette_color(PaletteId('A'), 0, 99, 98, 97)
        .unwrap();
    let after_overwrite = mgr.get_scene(1).unwrap().palettes[&PaletteId('A')].clone();

    assert_eq!(after_repeat.get(0i64), ledctl::Rgb::new(10, 20, 30));
    assert_eq!(after_overwrite.get(0i64), ledctl::Rgb::new(99, 98, 97));
}
