use super::*;
use crate::foundation::core::{CanvasSize, Rgba8Premul};
use crate::scene::model::{FadeConfig, OverlayKind, TextLayerConfig, VignetteConfig};
use crate::surface::objects::ObjectKind;

fn bmp() -> Bitmap {
    Bitmap::solid(4, 4, Rgba8Premul::from_straight_rgba(1, 2, 3, 255)).unwrap()
}

fn scene(fade: bool, vignette: bool, texts: usize, logo: bool) -> SceneDescription {
    SceneDescription {
        canvas: CanvasSize::new(100, 100).unwrap(),
        fade: FadeConfig {
            enabled: fade,
            ..FadeConfig::default()
        },
        vignette: VignetteConfig {
            enabled: vignette,
            ..VignetteConfig::default()
        },
        text_layers: (0..texts)
            .map(|i| TextLayerConfig {
                content: format!("t{i}"),
                ..TextLayerConfig::default()
            })
            .collect(),
        logo: crate::scene::model::LogoConfig {
            enabled: logo,
            ..Default::default()
        },
        ..SceneDescription::default()
    }
}

fn expected(image: bool, fade: bool, vignette: bool, texts: usize, logo: bool) -> Vec<ObjectKind> {
    let mut v = Vec::new();
    if image {
        v.push(ObjectKind::Image);
    }
    if fade {
        v.push(ObjectKind::Overlay(OverlayKind::Fade));
    }
    if vignette {
        v.push(ObjectKind::Overlay(OverlayKind::Vignette));
    }
    v.extend(std::iter::repeat_n(ObjectKind::Text, texts));
    if logo {
        v.push(ObjectKind::Logo);
    }
    v
}

#[test]
fn populate_orders_every_combination() {
    for image in [false, true] {
        for fade in [false, true] {
            for vignette in [false, true] {
                for texts in 1..=5 {
                    for logo in [false, true] {
                        let sc = scene(fade, vignette, texts, logo);
                        let mut s = Surface::new(sc.canvas, 1, &sc.bg_color);
                        let img = bmp();
                        let h = populate(&mut s, &sc, image.then_some(&img), Some(&bmp()));
                        assert_eq!(s.kinds(), expected(image, fade, vignette, texts, logo));
                        assert_eq!(h.texts.len(), texts);
                        for (i, th) in h.texts.iter().enumerate() {
                            assert_eq!(s.text(*th).unwrap().text, format!("t{i}"));
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn restack_puts_vignette_above_fade_above_image() {
    let sc = scene(true, true, 2, true);
    let mut s = Surface::new(sc.canvas, 1, "#000000");
    let img = bmp();
    let h = populate(&mut s, &sc, Some(&img), Some(&bmp()));
    let (fade, vig) = (h.fade.unwrap(), h.vignette.unwrap());
    let top = s.iter().last().map(|(id, _)| id);
    s.move_above(fade.id(), top);
    s.move_above(vig.id(), None);
    h.restack_overlays(&mut s);
    assert_eq!(s.kinds(), expected(true, true, true, 2, true));
    assert_eq!(h.text_insert_index(&s), 5);
}

#[test]
fn logo_needs_artwork() {
    let sc = scene(false, false, 1, true);
    let mut s = Surface::new(sc.canvas, 1, "#000000");
    let h = populate(&mut s, &sc, None, None);
    assert!(h.logo.is_none());
    assert_eq!(s.kinds(), vec![ObjectKind::Text]);
}

#[test]
fn background_gradient_only_when_enabled() {
    let mut sc = scene(false, false, 1, false);
    let mut s = Surface::new(sc.canvas, 1, "#000000");
    populate(&mut s, &sc, None, None);
    assert!(s.background.gradient.is_none());
    sc.bg_gradient.enabled = true;
    apply_background(&mut s, "#123456", &sc.bg_gradient);
    assert!(s.background.gradient.is_some());
    assert_eq!(s.background.color, "#123456");
}
