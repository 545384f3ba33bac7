use super::*;

fn canvas() -> CanvasSize {
    CanvasSize::new(1080, 1080).unwrap()
}

#[test]
fn fade_bottom_runs_from_edge_into_transparency() {
    let fc = FadeConfig {
        enabled: true,
        direction: GradientDirection::Bottom,
        opacity: 0.7,
        color: "#000000".into(),
        coverage: 60.0,
    };
    let FillDescriptor::Linear { start, end, stops } = fade_gradient(&fc, canvas()) else {
        panic!("fade must be linear");
    };
    assert_eq!(start, Point::new(0.0, 1080.0));
    assert!((end.y - 432.0).abs() < 1e-9);
    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0], ColorStop::new(0.0, ColorRgba::rgba(0, 0, 0, 0.7)));
    assert_eq!(stops[1], ColorStop::new(1.0, ColorRgba::rgba(0, 0, 0, 0.0)));
}

#[test]
fn fade_directions_cover_the_named_edge() {
    let c = CanvasSize::new(200, 100).unwrap();
    let mut fc = FadeConfig {
        coverage: 50.0,
        ..FadeConfig::default()
    };
    let cases = [
        (GradientDirection::Top, (0.0, 0.0), (0.0, 50.0)),
        (GradientDirection::Left, (0.0, 0.0), (100.0, 0.0)),
        (GradientDirection::Right, (200.0, 0.0), (100.0, 0.0)),
    ];
    for (dir, s, e) in cases {
        fc.direction = dir;
        let FillDescriptor::Linear { start, end, .. } = fade_gradient(&fc, c) else {
            panic!("linear");
        };
        assert_eq!((start.x, start.y), s, "{dir:?}");
        assert_eq!((end.x, end.y), e, "{dir:?}");
    }
}

#[test]
fn fade_with_zero_coverage_paints_nothing() {
    let fc = FadeConfig {
        coverage: 0.0,
        ..FadeConfig::default()
    };
    let d = fade_gradient(&fc, canvas());
    assert_eq!(d.sample(Point::new(10.0, 1079.0)), Rgba8Premul::transparent());
}

#[test]
fn vignette_radii_and_stops() {
    let vc = VignetteConfig {
        enabled: true,
        strength: 0.8,
        size: 50.0,
        color: "#000000".into(),
    };
    let c = CanvasSize::new(1080, 1920).unwrap();
    let FillDescriptor::Radial {
        center,
        inner_radius,
        outer_radius,
        stops,
    } = vignette_gradient(&vc, c)
    else {
        panic!("vignette must be radial");
    };
    assert_eq!(center, Point::new(540.0, 960.0));
    assert!((outer_radius - 960.0).abs() < 1e-9);
    assert!((inner_radius - 288.0).abs() < 1e-9);
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0].color.a, 0.0);
    assert!((stops[1].color.a - 0.24).abs() < 1e-9);
    assert_eq!(stops[1].offset, 0.5);
    assert!((stops[2].color.a - 0.8).abs() < 1e-9);
}

#[test]
fn vignette_sampling_is_clear_in_center_and_dark_at_rim() {
    let vc = VignetteConfig {
        enabled: true,
        strength: 1.0,
        size: 50.0,
        color: "#000000".into(),
    };
    let d = vignette_gradient(&vc, canvas());
    assert_eq!(d.sample(Point::new(540.0, 540.0)).a, 0);
    assert_eq!(d.sample(Point::new(0.0, 0.0)).a, 255);
}

#[test]
fn linear_coords_follow_direction() {
    assert_eq!(
        linear_coords(GradientDirection::Bottom, 10.0, 20.0),
        (Point::new(0.0, 0.0), Point::new(0.0, 20.0))
    );
    assert_eq!(
        linear_coords(GradientDirection::Top, 10.0, 20.0),
        (Point::new(0.0, 20.0), Point::new(0.0, 0.0))
    );
    assert_eq!(
        linear_coords(GradientDirection::Left, 10.0, 20.0),
        (Point::new(10.0, 0.0), Point::new(0.0, 0.0))
    );
    assert_eq!(
        linear_coords(GradientDirection::Right, 10.0, 20.0),
        (Point::new(0.0, 0.0), Point::new(10.0, 0.0))
    );
}

#[test]
fn linear_sampling_interpolates_premultiplied() {
    let d = linear_gradient("#ff0000", "#0000ff", GradientDirection::Right, 100.0, 10.0);
    assert_eq!(d.sample(Point::new(0.0, 5.0)).to_array(), [255, 0, 0, 255]);
    assert_eq!(d.sample(Point::new(100.0, 5.0)).to_array(), [0, 0, 255, 255]);
    assert_eq!(d.sample(Point::new(50.0, 5.0)).to_array(), [128, 0, 128, 255]);
    // Pad extend beyond the segment.
    assert_eq!(d.sample(Point::new(-40.0, 5.0)).to_array(), [255, 0, 0, 255]);
}

#[test]
fn text_gradient_spans_one_line_box() {
    let tg = TextGradient {
        enabled: true,
        color1: "#ffffff".into(),
        color2: "#000000".into(),
        direction: GradientDirection::Bottom,
    };
    let FillDescriptor::Linear { end, .. } = text_gradient(&tg, 500.0, 40.0, 1.5) else {
        panic!("linear");
    };
    assert_eq!(end, Point::new(0.0, 60.0));
}

#[test]
fn bg_gradient_uses_full_canvas() {
    let bg = BgGradientConfig {
        enabled: true,
        direction: GradientDirection::Left,
        ..BgGradientConfig::default()
    };
    let FillDescriptor::Linear { start, end, stops } = bg_gradient(&bg, canvas()) else {
        panic!("linear");
    };
    assert_eq!(start, Point::new(1080.0, 0.0));
    assert_eq!(end, Point::new(0.0, 0.0));
    assert_eq!(stops[0].color, ColorRgba::rgba(0x1a, 0x1a, 0x1a, 1.0));
}
