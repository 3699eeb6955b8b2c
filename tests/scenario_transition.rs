//! End-to-end pattern-transition scenario: fade out the prior effect, go
//! black while waiting, fade in the new effect, then commit.

use std::time::{Duration, Instant};

use ledctl::{Rgb, SceneManager, TransitionConfig};

fn scene_json() -> &'static str {
    r#"{
        "scene_ID": 1,
        "current_effect_ID": 1,
        "current_palette": "A",
        "palettes": { "A": [[255,255,255],[0,0,0],[0,0,0],[0,0,0],[0,0,0],[0,0,0]] },
        "effects": {
            "1": {
                "effect_ID": 1,
                "led_count": 3,
                "fps": 60,
                "time": 0,
                "segments": {
                    "1": {
                        "segment_ID": 1,
                        "color": [0],
                        "transparency": [1.0],
                        "length": [1],
                        "move_speed": 0,
                        "move_range": [0, 2],
                        "initial_position": 0,
                        "current_position": 0,
                        "is_edge_reflect": true,
                        "dimmer_time": [],
                        "gradient": false,
                        "gradient_colors": [],
                        "fade": false
                    }
                }
            },
            "2": {
                "effect_ID": 2,
                "led_count": 3,
                "fps": 60,
                "time": 0,
                "segments": {
                    "1": {
                        "segment_ID": 1,
                        "color": [0],
                        "transparency": [1.0],
                        "length": [1],
                        "move_speed": 0,
                        "move_range": [0, 2],
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
fn transition_timeline_fades_out_waits_black_then_fades_in_and_commits() {
    let config = TransitionConfig {
        enabled: true,
        fade_out_ms: 100,
        waiting_ms: 50,
        fade_in_ms: 100,
    };
    let mut mgr = SceneManager::new(3, config);
    mgr.load_scene_text(scene_json()).unwrap();

    let t0 = Instant::now();
    mgr.set_effect(2, t0).unwrap();

    // t = 50ms: mid fade-out. Prior effect (LED0 white) scaled by 0.5.
    mgr.update_animation(0.0, t0 + Duration::from_millis(50));
    let frame = mgr.get_led_output();
    assert_eq!(frame.as_slice()[0], Rgb::new(128, 128, 128));
    assert_eq!(frame.as_slice()[2], Rgb::BLACK);

    // t = 100ms: fade-out elapses, phase flips to waiting.
    mgr.update_animation(0.0, t0 + Duration::from_millis(100));

    // t = 120ms: still waiting, all black.
    mgr.update_animation(0.0, t0 + Duration::from_millis(120));
    let frame = mgr.get_led_output();
    assert!(frame.as_slice().iter().all(|p| *p == Rgb::BLACK));

    // t = 150ms: waiting elapses, phase flips to fade-in.
    mgr.update_animation(0.0, t0 + Duration::from_millis(150));

    // t = 200ms: mid fade-in (50ms into a 100ms fade). New effect (LED2
    // white) scaled by 0.5.
    mgr.update_animation(0.0, t0 + Duration::from_millis(200));
    let frame = mgr.get_led_output();
    assert_eq!(frame.as_slice()[2], Rgb::new(128, 128, 128));
    assert_eq!(frame.as_slice()[0], Rgb::BLACK);

    // t = 260ms: fade-in elapses, commit has occurred, full brightness.
    mgr.update_animation(0.0, t0 + Duration::from_millis(260));
    let frame = mgr.get_led_output();
    assert_eq!(frame.as_slice()[2], Rgb::new(255, 255, 255));
    assert_eq!(mgr.get_scene(1).unwrap().current_effect_id, Some(2));
}
