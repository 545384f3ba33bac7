use super::*;

#[test]
fn parses_hex_with_and_without_hash() {
    assert_eq!(
        hex_to_rgba("#ff8000", 0.7).unwrap(),
        ColorRgba::rgba(255, 128, 0, 0.7)
    );
    assert_eq!(
        hex_to_rgba("1A1a1A", 1.0).unwrap(),
        ColorRgba::rgba(26, 26, 26, 1.0)
    );
}

#[test]
fn rejects_short_and_garbage_hex() {
    assert!(hex_to_rgba("#fff", 1.0).is_err());
    assert!(hex_to_rgba("#gg0000", 1.0).is_err());
    assert!(hex_to_rgba("", 1.0).is_err());
}

#[test]
fn alpha_is_clamped_and_premul_applies_it() {
    let c = hex_to_rgba("#ffffff", 3.0).unwrap();
    assert_eq!(c.a, 1.0);
    let half = ColorRgba::rgba(255, 255, 255, 0.5).to_rgba8_premul();
    assert_eq!(half.to_array(), [128, 128, 128, 128]);
}

#[test]
fn lenient_parse_falls_back_to_black() {
    assert_eq!(hex_to_rgba_or_black("oops", 0.25), ColorRgba::rgba(0, 0, 0, 0.25));
    assert_eq!(optional_color("  "), None);
    assert_eq!(optional_color("#000000"), Some("#000000"));
}

#[test]
fn display_matches_css_rgba() {
    assert_eq!(ColorRgba::rgba(1, 2, 3, 0.5).to_string(), "rgba(1,2,3,0.5)");
}
