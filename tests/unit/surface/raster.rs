use super::*;
use crate::codec::gradient::fade_gradient;
use crate::foundation::core::{CanvasSize, Rgba8Premul, Vec2};
use crate::codec::style::to_live_style;
use crate::scene::model::{
    FadeConfig, GradientDirection, OverlayKind, TextAlign, TextGradient, TextLayerConfig,
};
use crate::surface::objects::{ImageObject, OverlayObject};

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| (i16::from(*x) - i16::from(y)).abs() <= 2)
}

fn renderer() -> SurfaceRenderer {
    SurfaceRenderer::new(FontBook::new(), RenderSettings::default())
}

#[test]
fn background_color_fills_canvas_at_native_size() {
    let s = Surface::new(CanvasSize::new(20, 10).unwrap(), 1, "#ff0000");
    let frame = renderer().render(&s, false).unwrap();
    assert_eq!((frame.width, frame.height), (20, 10));
    assert_eq!(frame.data.len(), 20 * 10 * 4);
    assert!(close(frame.pixel(3, 3).unwrap(), [255, 0, 0, 255]));
}

#[test]
fn empty_background_stays_transparent() {
    let s = Surface::new(CanvasSize::new(4, 4).unwrap(), 1, "");
    let frame = renderer().render(&s, false).unwrap();
    assert_eq!(frame.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn image_covers_background() {
    let mut s = Surface::new(CanvasSize::new(20, 20).unwrap(), 1, "#ff0000");
    s.insert_image(
        0,
        ImageObject {
            bitmap: Bitmap::solid(2, 2, Rgba8Premul::from_straight_rgba(0, 0, 255, 255)).unwrap(),
            center: Point::new(10.0, 10.0),
            scale_x: 10.0,
            scale_y: 10.0,
            clip: None,
            opacity: 1.0,
        },
    );
    let frame = renderer().render(&s, false).unwrap();
    assert!(close(frame.pixel(10, 10).unwrap(), [0, 0, 255, 255]));
    assert!(close(frame.pixel(0, 19).unwrap(), [0, 0, 255, 255]));
}

#[test]
fn clipped_image_leaves_padding_visible() {
    let mut s = Surface::new(CanvasSize::new(20, 20).unwrap(), 1, "#ff0000");
    s.insert_image(
        0,
        ImageObject {
            bitmap: Bitmap::solid(20, 20, Rgba8Premul::from_straight_rgba(0, 0, 255, 255))
                .unwrap(),
            center: Point::new(10.0, 10.0),
            scale_x: 1.0,
            scale_y: 1.0,
            clip: Some(Vec2::new(10.0, 10.0)),
            opacity: 1.0,
        },
    );
    let frame = renderer().render(&s, false).unwrap();
    assert!(close(frame.pixel(10, 10).unwrap(), [0, 0, 255, 255]));
    assert!(close(frame.pixel(1, 1).unwrap(), [255, 0, 0, 255]));
}

#[test]
fn fade_darkens_from_named_edge() {
    let size = CanvasSize::new(10, 100).unwrap();
    let mut s = Surface::new(size, 1, "#ffffff");
    let fc = FadeConfig {
        enabled: true,
        direction: GradientDirection::Bottom,
        opacity: 1.0,
        color: "#000000".into(),
        coverage: 100.0,
    };
    s.insert_overlay(
        0,
        OverlayObject {
            kind: OverlayKind::Fade,
            width: 10.0,
            height: 100.0,
            fill: fade_gradient(&fc, size),
        },
    );
    let frame = renderer().render(&s, false).unwrap();
    let top = frame.pixel(5, 0).unwrap();
    let bottom = frame.pixel(5, 99).unwrap();
    assert!(top[0] > 240, "{top:?}");
    assert!(bottom[0] < 15, "{bottom:?}");
}

#[test]
fn text_without_fonts_paints_only_background_plate() {
    let mut s = Surface::new(CanvasSize::new(40, 40).unwrap(), 1, "#000000");
    let mut t = TextObject::new("hello".into(), 10.0, 0.0, 20.0);
    t.background_color = "#00ff00".into();
    t.line_height = 1.0;
    t.init_dimensions();
    s.insert_text(0, t);
    let mut r = renderer();
    let frame = r.render(&s, false).unwrap();
    assert!(close(frame.pixel(5, 5).unwrap(), [0, 255, 0, 255]));
    assert!(close(frame.pixel(30, 30).unwrap(), [0, 0, 0, 255]));
}

#[test]
fn chrome_only_drawn_when_requested() {
    let mut s = Surface::new(CanvasSize::new(40, 40).unwrap(), 1, "#000000");
    let mut t = TextObject::new("x".into(), 10.0, 0.0, 20.0);
    t.left = 10.0;
    t.top = 10.0;
    t.line_height = 1.0;
    t.init_dimensions();
    let h = s.insert_text(0, t);
    s.set_active(Some(h.id()));

    let mut r = renderer();
    let plain = r.render(&s, false).unwrap();
    assert!(close(plain.pixel(10, 10).unwrap(), [0, 0, 0, 255]));
    let preview = r.render(&s, true).unwrap();
    assert!(close(preview.pixel(10, 10).unwrap(), [0x4f, 0x8e, 0xf7, 255]));
}

fn font_renderer() -> SurfaceRenderer {
    let mut fonts = FontBook::new();
    let bytes = std::fs::read(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/fonts/Tuffy.ttf"
    ))
    .unwrap();
    fonts.register("Tuffy", false, false, bytes);
    SurfaceRenderer::new(fonts, RenderSettings::default())
}

fn text_cfg(content: &str) -> TextLayerConfig {
    TextLayerConfig {
        content: content.into(),
        x: 20.0,
        y: 20.0,
        font_size: 60.0,
        font_family: "Tuffy".into(),
        font_weight: "normal".into(),
        fill: "#ff0000".into(),
        text_align: TextAlign::Left,
        width: 200.0,
        line_height: 1.0,
        ..TextLayerConfig::default()
    }
}

fn paint(cfg: &TextLayerConfig, bg: &str) -> FrameRGBA {
    let mut s = Surface::new(CanvasSize::new(240, 200).unwrap(), 1, bg);
    s.insert_text(0, to_live_style(cfg));
    font_renderer().render(&s, false).unwrap()
}

fn pixels_where(frame: &FrameRGBA, f: impl Fn([u8; 4]) -> bool) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..frame.height {
        for x in 0..frame.width {
            if f(frame.pixel(x, y).unwrap()) {
                out.push((x, y));
            }
        }
    }
    out
}

fn reddish(px: [u8; 4]) -> bool {
    px[0] > 200 && px[1] < 40 && px[2] < 40
}

#[test]
fn solid_text_paints_glyphs_inside_its_box() {
    let frame = paint(&text_cfg("HHH"), "#000000");
    let red = pixels_where(&frame, reddish);
    assert!(red.len() > 100, "{}", red.len());
    assert!(red.iter().all(|&(x, y)| (20..220).contains(&x) && (20..80).contains(&y)));
}

#[test]
fn measured_box_matches_painted_lines() {
    let mut r = font_renderer();
    let one = to_live_style(&text_cfg("HHH"));
    let wrapped = to_live_style(&text_cfg("HHH HHH HHH"));
    assert_eq!(r.measure_text(&one).unwrap(), Some(Vec2::new(200.0, 60.0)));
    let dims = r.measure_text(&wrapped).unwrap().unwrap();
    assert_eq!(dims.x, 200.0);
    assert!(dims.y >= 120.0, "{dims:?}");

    let frame = paint(&text_cfg("HHH HHH HHH"), "#000000");
    let lowest = pixels_where(&frame, reddish)
        .into_iter()
        .map(|(_, y)| f64::from(y))
        .fold(0.0, f64::max);
    assert!(lowest > 80.0 && lowest < 20.0 + dims.y, "{lowest} vs {dims:?}");
}

#[test]
fn empty_font_book_measures_nothing() {
    let obj = to_live_style(&text_cfg("HHH"));
    assert_eq!(renderer().measure_text(&obj).unwrap(), None);
}

#[test]
fn fill_gradient_runs_down_the_first_line_and_pads_below() {
    let mut cfg = text_cfg("HHH\nHHH");
    cfg.fill_gradient = Some(TextGradient {
        enabled: true,
        color1: "#ff0000".into(),
        color2: "#0000ff".into(),
        direction: GradientDirection::Bottom,
    });
    let frame = paint(&cfg, "#000000");
    let inked = pixels_where(&frame, |px| u16::from(px[0]) + u16::from(px[2]) > 200);
    let top = inked.iter().map(|&(_, y)| y).min().unwrap();
    let first_line_bottom = inked.iter().map(|&(_, y)| y).filter(|&y| y < 80).max().unwrap();

    let row = |y: u32| {
        inked
            .iter()
            .filter(|&&(_, py)| py == y)
            .map(|&(x, _)| frame.pixel(x, y).unwrap())
            .fold((0u32, 0u32), |(r, b), px| (r + u32::from(px[0]), b + u32::from(px[2])))
    };
    let (r_top, b_top) = row(top);
    assert!(r_top > b_top, "top row r={r_top} b={b_top}");
    let (r_low, b_low) = row(first_line_bottom);
    assert!(b_low > r_low, "first line bottom r={r_low} b={b_low}");

    let second: Vec<_> = inked.iter().filter(|&&(_, y)| y >= 80).collect();
    assert!(!second.is_empty());
    assert!(second.iter().all(|&&(x, y)| {
        let px = frame.pixel(x, y).unwrap();
        px[2] > px[0]
    }));
}

#[test]
fn stroke_color_outlines_glyphs() {
    let mut cfg = text_cfg("HHH");
    cfg.fill = "#000000".into();
    let plain = paint(&cfg, "#ffffff");
    let inside = |x: u32, y: u32| plain.pixel(x, y).is_some_and(|px| px[0] < 128);

    cfg.stroke_color = "#00ff00".into();
    let green = |px: [u8; 4]| px[1] > 200 && px[0] < 60 && px[2] < 60;
    assert!(pixels_where(&paint(&cfg, "#ffffff"), green).is_empty());

    cfg.stroke_width = 4.0;
    let edges = pixels_where(&paint(&cfg, "#ffffff"), green);
    assert!(edges.len() > 50, "{}", edges.len());
    for (x, y) in edges {
        let near: Vec<bool> = (x.saturating_sub(3)..=x + 3)
            .flat_map(|nx| (y.saturating_sub(3)..=y + 3).map(move |ny| (nx, ny)))
            .map(|(nx, ny)| inside(nx, ny))
            .collect();
        assert!(near.contains(&true) && near.contains(&false), "({x},{y}) not on an edge");
    }
}

#[test]
fn shadow_sits_below_and_right_of_glyphs() {
    let mut cfg = text_cfg("HHH");
    cfg.fill = "#000000".into();
    let plain = paint(&cfg, "#ffffff");
    cfg.shadow = true;
    let shadowed = paint(&cfg, "#ffffff");

    let centroid = |weights: &dyn Fn(u32, u32) -> f64| {
        let (mut sx, mut sy, mut sw) = (0.0, 0.0, 0.0);
        for y in 0..plain.height {
            for x in 0..plain.width {
                let w = weights(x, y);
                sx += w * f64::from(x);
                sy += w * f64::from(y);
                sw += w;
            }
        }
        assert!(sw > 0.0);
        (sx / sw, sy / sw)
    };
    let glyphs = centroid(&|x, y| f64::from(255 - plain.pixel(x, y).unwrap()[0]));
    let shadow = centroid(&|x, y| {
        let a = plain.pixel(x, y).unwrap()[0];
        let b = shadowed.pixel(x, y).unwrap()[0];
        f64::from(a.abs_diff(b))
    });
    assert!(shadow.0 > glyphs.0 + 0.5, "{shadow:?} vs {glyphs:?}");
    assert!(shadow.1 > glyphs.1 + 0.5, "{shadow:?} vs {glyphs:?}");
}

#[test]
fn background_plate_fills_the_text_box_only() {
    let mut cfg = text_cfg("H");
    cfg.background_color = "#0000ff".into();
    let frame = paint(&cfg, "#000000");
    assert!(close(frame.pixel(210, 25).unwrap(), [0, 0, 255, 255]));
    assert!(close(frame.pixel(230, 25).unwrap(), [0, 0, 0, 255]));
    assert!(close(frame.pixel(100, 90).unwrap(), [0, 0, 0, 255]));
}

#[test]
fn alignment_moves_glyphs_within_the_box() {
    let min_x = |align: TextAlign| {
        let mut cfg = text_cfg("H");
        cfg.text_align = align;
        pixels_where(&paint(&cfg, "#000000"), reddish)
            .into_iter()
            .map(|(x, _)| x)
            .min()
            .unwrap()
    };
    let (left, center, right) = (
        min_x(TextAlign::Left),
        min_x(TextAlign::Center),
        min_x(TextAlign::Right),
    );
    assert!(left < 40, "{left}");
    assert!(left < center && center < right, "{left} {center} {right}");
    assert!(right > 160, "{right}");
}

#[test]
fn layer_opacity_dims_text() {
    let mut cfg = text_cfg("HHH");
    cfg.opacity = 0.5;
    let frame = paint(&cfg, "#000000");
    let reds: Vec<u8> = pixels_where(&frame, |px| px[0] > 0)
        .into_iter()
        .map(|(x, y)| frame.pixel(x, y).unwrap()[0])
        .collect();
    let max = reds.iter().copied().max().unwrap();
    assert!((120..=136).contains(&max), "{max}");
}
