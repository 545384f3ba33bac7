use super::*;
use crate::foundation::core::Rgba8Premul;

fn bitmap(w: u32, h: u32) -> Bitmap {
    Bitmap::solid(w, h, Rgba8Premul::from_straight_rgba(255, 0, 0, 255)).unwrap()
}

#[test]
fn image_bounds_follow_center_scale_and_clip() {
    let img = ImageObject {
        bitmap: bitmap(2000, 1000),
        center: Point::new(540.0, 540.0),
        scale_x: 0.88,
        scale_y: 0.88,
        clip: Some(Vec2::new(1000.0, 1000.0)),
        opacity: 1.0,
    };
    let b = SurfaceObject::Image(img).bounds();
    assert!((b.x0 - 100.0).abs() < 1e-9);
    assert!((b.x1 - 980.0).abs() < 1e-9);
    assert!((b.y0 - 100.0).abs() < 1e-9);
    assert!((b.y1 - 980.0).abs() < 1e-9);
}

#[test]
fn overlays_are_not_selectable_and_ignore_moves() {
    let mut o = SurfaceObject::Overlay(OverlayObject {
        kind: OverlayKind::Fade,
        width: 100.0,
        height: 50.0,
        fill: FillDescriptor::Linear {
            start: Point::ZERO,
            end: Point::new(0.0, 50.0),
            stops: Vec::new(),
        },
    });
    assert!(!o.selectable());
    o.translate(Vec2::new(10.0, 10.0));
    o.scale_by(2.0, 2.0);
    assert_eq!(o.bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    assert_eq!(o.kind(), ObjectKind::Overlay(OverlayKind::Fade));
}

#[test]
fn text_live_writes_mark_layout_dirty() {
    let mut t = TextObject::new("hello".into(), 40.0, 0.0, 500.0);
    assert!(!t.is_dirty());
    t.set_live_font_size(20.0);
    assert!(t.is_dirty());
    t.init_dimensions();
    assert!(!t.is_dirty());
    assert_eq!(t.dimensions(), Vec2::new(500.0, 20.0));
}

#[test]
fn text_wraps_into_multiple_line_boxes() {
    let mut t = TextObject::new("aaaa bbbb cccc".into(), 10.0, 0.0, 25.0);
    t.line_height = 2.0;
    t.init_dimensions();
    // 5 px per glyph, 5 glyphs per line, one word per line.
    assert_eq!(t.dimensions().y, 60.0);
}

#[test]
fn text_scale_applies_to_bounds() {
    let mut o = SurfaceObject::Text(TextObject::new("x".into(), 10.0, 0.0, 100.0));
    o.translate(Vec2::new(5.0, 5.0));
    o.scale_by(2.0, 3.0);
    let b = o.bounds();
    assert_eq!(b, Rect::new(5.0, 5.0, 205.0, 35.0));
}

#[test]
fn logo_bounds_use_top_left_anchor() {
    let logo = LogoObject {
        bitmap: bitmap(200, 100),
        left: 880.0,
        top: 880.0,
        scale_x: 0.5,
        scale_y: 0.5,
        opacity: 1.0,
    };
    assert_eq!(
        SurfaceObject::Logo(logo).bounds(),
        Rect::new(880.0, 880.0, 980.0, 930.0)
    );
}
