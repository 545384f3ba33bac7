use serde_json::json;

use super::*;

#[test]
fn text_layer_defaults_fill_missing_fields() {
    let t: TextLayerConfig = serde_json::from_value(json!({
        "content": "Hello",
        "x": 10,
        "fontSize": 48
    }))
    .unwrap();
    assert_eq!(t.content, "Hello");
    assert_eq!(t.x, 10.0);
    assert_eq!(t.y, 900.0);
    assert_eq!(t.font_size, 48.0);
    assert_eq!(t.text_transform, TextTransform::None);
    assert_eq!(t.font_style, FontStyle::Normal);
    assert_eq!(t.text_align, TextAlign::Center);
}

#[test]
fn text_layer_wire_names_are_camel_case() {
    let v = serde_json::to_value(TextLayerConfig::default()).unwrap();
    assert_eq!(v["fontSize"], json!(36.0));
    assert_eq!(v["fill"], json!("#ffffff"));
    assert_eq!(v["textTransform"], json!("none"));
    assert_eq!(v["textAlign"], json!("center"));
    assert!(v.get("fillGradient").is_none());

    let t: TextLayerConfig = serde_json::from_value(json!({"fillColor": "#123456"})).unwrap();
    assert_eq!(t.fill, "#123456");
}

#[test]
fn active_gradient_requires_enabled() {
    let mut t = TextLayerConfig::default();
    assert!(t.active_gradient().is_none());
    t.fill_gradient = Some(TextGradient {
        enabled: false,
        color1: "#ff0000".into(),
        color2: "#0000ff".into(),
        direction: GradientDirection::Right,
    });
    assert!(t.active_gradient().is_none());
    t.fill_gradient.as_mut().unwrap().enabled = true;
    assert!(t.active_gradient().is_some());
}

#[test]
fn scene_validation() {
    let mut s = SceneDescription::default();
    s.validate().unwrap();
    assert_eq!(s.text_layers.len(), 1);
    assert!(s.logo.enabled);

    s.text_layers.clear();
    assert!(s.validate().is_err());

    let mut s = SceneDescription::default();
    s.text_layers[0].line_height = 0.0;
    assert!(s.validate().is_err());

    let mut s = SceneDescription::default();
    s.image_padding = -1.0;
    s.validate().unwrap();
    s.image_padding = f64::NAN;
    assert!(s.validate().is_err());
}

#[test]
fn align_factors() {
    assert_eq!(TextAlign::Left.factor(), 0.0);
    assert_eq!(TextAlign::Center.factor(), 0.5);
    assert_eq!(TextAlign::Right.factor(), 1.0);
}
