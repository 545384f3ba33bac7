use serde_json::json;

use super::*;
use crate::scene::model::GradientDirection;

fn legacy_fade() -> serde_json::Value {
    json!({
        "enabled": true,
        "direction": "top",
        "opacity": 0.4,
        "color": "#102030",
        "coverage": 35
    })
}

#[test]
fn legacy_gradient_config_reads_as_fade_config() {
    let legacy: Template = serde_json::from_value(json!({
        "id": "1",
        "name": "old",
        "textConfigs": [{"content": "a"}],
        "logoConfig": {"enabled": false, "x": 1, "y": 2, "scale": 0.2, "opacity": 0.5},
        "gradientConfig": legacy_fade(),
        "canvasWidth": 1080,
        "canvasHeight": 1080,
        "bgColor": "#000000",
        "imagePadding": 0
    }))
    .unwrap();
    let current: Template = serde_json::from_value(json!({
        "id": "1",
        "name": "old",
        "textConfigs": [{"content": "a"}],
        "logoConfig": {"enabled": false, "x": 1, "y": 2, "scale": 0.2, "opacity": 0.5},
        "fadeConfig": legacy_fade(),
        "canvasWidth": 1080,
        "canvasHeight": 1080,
        "bgColor": "#000000",
        "imagePadding": 0
    }))
    .unwrap();

    assert_eq!(legacy, current);
    assert!(legacy.fade_config.enabled);
    assert_eq!(legacy.fade_config.direction, GradientDirection::Top);
    assert_eq!(legacy.scene().unwrap(), current.scene().unwrap());
}

#[test]
fn current_fade_config_wins_over_legacy() {
    let t: Template = serde_json::from_value(json!({
        "textConfigs": [{}],
        "fadeConfig": {"enabled": false},
        "gradientConfig": legacy_fade(),
        "canvasWidth": 10,
        "canvasHeight": 10
    }))
    .unwrap();
    assert!(!t.fade_config.enabled);
}

#[test]
fn serialization_never_writes_legacy_name() {
    let t = Template::from_scene("id", "name", &SceneDescription::default());
    let v = serde_json::to_value(&t).unwrap();
    assert!(v.get("gradientConfig").is_none());
    assert!(v.get("fadeConfig").is_some());
    assert_eq!(v["canvasWidth"], json!(1080));
    let back = Template::from_json_str(&t.to_json_pretty().unwrap()).unwrap();
    assert_eq!(back, t);
}

#[test]
fn missing_optional_sections_take_defaults() {
    let t: Template = serde_json::from_value(json!({
        "textConfigs": [{"content": "x"}],
        "canvasWidth": 1200,
        "canvasHeight": 675
    }))
    .unwrap();
    assert_eq!(t.bg_color, DEFAULT_BG_COLOR);
    assert_eq!(t.vignette_config, VignetteConfig::default());
    assert_eq!(t.logo_config, LogoConfig::default());
    let scene = t.scene().unwrap();
    assert_eq!(scene.canvas, CanvasSize::new(1200, 675).unwrap());
}

#[test]
fn validate_rejects_empty_layers_and_zero_size() {
    let mut t = Template::from_scene("a", "b", &SceneDescription::default());
    t.text_configs.clear();
    assert!(matches!(t.validate(), Err(PostkitError::Template(_))));

    let mut t = Template::from_scene("a", "b", &SceneDescription::default());
    t.canvas_height = 0;
    assert!(t.validate().is_err());
    assert!(t.scene().is_err());
}
