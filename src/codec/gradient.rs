//! Gradient fill descriptors shared by every overlay type.
//!
//! All four gradient flavours (background gradient, directional fade, radial vignette and
//! text fill) reduce to a [`FillDescriptor`] in pixel units of the shape they fill. The
//! surface rasterizer samples descriptors with canvas gradient semantics: `t` is clamped to
//! `[0, 1]` (pad extend) and stops are interpolated in premultiplied space.

use crate::assets::color::{ColorRgba, hex_to_rgba_or_black};
use crate::foundation::core::{CanvasSize, Point, Rgba8Premul};
use crate::foundation::math::{lerp, unit_to_u8};
use crate::scene::model::{
    BgGradientConfig, FadeConfig, GradientDirection, TextGradient, VignetteConfig,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f64,
    pub color: ColorRgba,
}

impl ColorStop {
    pub fn new(offset: f64, color: ColorRgba) -> Self {
        Self { offset, color }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum FillDescriptor {
    /// Gradient along the segment `start -> end`.
    Linear {
        start: Point,
        end: Point,
        stops: Vec<ColorStop>,
    },
    /// Gradient between two concentric circles.
    Radial {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        stops: Vec<ColorStop>,
    },
}

impl FillDescriptor {
    pub fn stops(&self) -> &[ColorStop] {
        match self {
            Self::Linear { stops, .. } | Self::Radial { stops, .. } => stops,
        }
    }

    /// Gradient parameter at `p`, or `None` where a degenerate gradient paints nothing.
    pub fn param_at(&self, p: Point) -> Option<f64> {
        match self {
            Self::Linear { start, end, .. } => {
                let d = *end - *start;
                let len2 = d.hypot2();
                if len2 <= f64::EPSILON {
                    return None;
                }
                Some(((p - *start).dot(d) / len2).clamp(0.0, 1.0))
            }
            Self::Radial {
                center,
                inner_radius,
                outer_radius,
                ..
            } => {
                let dist = (p - *center).hypot();
                let span = outer_radius - inner_radius;
                if span <= f64::EPSILON {
                    return Some(if dist <= *inner_radius { 0.0 } else { 1.0 });
                }
                Some(((dist - inner_radius) / span).clamp(0.0, 1.0))
            }
        }
    }

    /// Premultiplied color at `p`.
    pub fn sample(&self, p: Point) -> Rgba8Premul {
        match self.param_at(p) {
            Some(t) => color_at(self.stops(), t),
            None => Rgba8Premul::transparent(),
        }
    }
}

fn premul_f(c: ColorRgba) -> [f64; 4] {
    let a = c.a.clamp(0.0, 1.0);
    [
        f64::from(c.r) / 255.0 * a,
        f64::from(c.g) / 255.0 * a,
        f64::from(c.b) / 255.0 * a,
        a,
    ]
}

fn color_at(stops: &[ColorStop], t: f64) -> Rgba8Premul {
    let Some(first) = stops.first() else {
        return Rgba8Premul::transparent();
    };
    let mut lo = first;
    let mut hi = first;
    for s in stops {
        if s.offset <= t {
            lo = s;
        }
        if s.offset >= t {
            hi = s;
            break;
        }
        hi = s;
    }
    let (a, b) = (premul_f(lo.color), premul_f(hi.color));
    let span = hi.offset - lo.offset;
    let k = if span <= f64::EPSILON {
        0.0
    } else {
        ((t - lo.offset) / span).clamp(0.0, 1.0)
    };
    Rgba8Premul {
        r: unit_to_u8(lerp(a[0], b[0], k)),
        g: unit_to_u8(lerp(a[1], b[1], k)),
        b: unit_to_u8(lerp(a[2], b[2], k)),
        a: unit_to_u8(lerp(a[3], b[3], k)),
    }
}

/// Segment for a full-extent gradient running toward `dir` inside a `w x h` box.
pub fn linear_coords(dir: GradientDirection, w: f64, h: f64) -> (Point, Point) {
    match dir {
        GradientDirection::Bottom => (Point::new(0.0, 0.0), Point::new(0.0, h)),
        GradientDirection::Top => (Point::new(0.0, h), Point::new(0.0, 0.0)),
        GradientDirection::Left => (Point::new(w, 0.0), Point::new(0.0, 0.0)),
        GradientDirection::Right => (Point::new(0.0, 0.0), Point::new(w, 0.0)),
    }
}

/// `color1 -> color2` across the whole box in direction `dir`.
pub fn linear_gradient(
    color1: &str,
    color2: &str,
    dir: GradientDirection,
    w: f64,
    h: f64,
) -> FillDescriptor {
    let (start, end) = linear_coords(dir, w, h);
    FillDescriptor::Linear {
        start,
        end,
        stops: vec![
            ColorStop::new(0.0, hex_to_rgba_or_black(color1, 1.0)),
            ColorStop::new(1.0, hex_to_rgba_or_black(color2, 1.0)),
        ],
    }
}

/// Fade from the named edge (at `opacity`) into transparency over `coverage%` of the extent.
pub fn fade_gradient(fc: &FadeConfig, canvas: CanvasSize) -> FillDescriptor {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let cf = fc.coverage.clamp(0.0, 100.0) / 100.0;
    let (start, end) = match fc.direction {
        GradientDirection::Bottom => (Point::new(0.0, h), Point::new(0.0, h * (1.0 - cf))),
        GradientDirection::Top => (Point::new(0.0, 0.0), Point::new(0.0, h * cf)),
        GradientDirection::Left => (Point::new(0.0, 0.0), Point::new(w * cf, 0.0)),
        GradientDirection::Right => (Point::new(w, 0.0), Point::new(w * (1.0 - cf), 0.0)),
    };
    let color = hex_to_rgba_or_black(&fc.color, 1.0);
    FillDescriptor::Linear {
        start,
        end,
        stops: vec![
            ColorStop::new(0.0, color.with_alpha(fc.opacity)),
            ColorStop::new(1.0, color.with_alpha(0.0)),
        ],
    }
}

/// Radial darkening centered on the canvas.
pub fn vignette_gradient(vc: &VignetteConfig, canvas: CanvasSize) -> FillDescriptor {
    let (w, h) = (canvas.width_f64(), canvas.height_f64());
    let radius = w.max(h) * (vc.size / 100.0);
    let color = hex_to_rgba_or_black(&vc.color, 1.0);
    FillDescriptor::Radial {
        center: canvas.center(),
        inner_radius: radius * 0.3,
        outer_radius: radius,
        stops: vec![
            ColorStop::new(0.0, ColorRgba::TRANSPARENT),
            ColorStop::new(0.5, color.with_alpha(vc.strength * 0.3)),
            ColorStop::new(1.0, color.with_alpha(vc.strength)),
        ],
    }
}

/// Full-canvas base plate gradient.
pub fn bg_gradient(bg: &BgGradientConfig, canvas: CanvasSize) -> FillDescriptor {
    linear_gradient(
        &bg.color1,
        &bg.color2,
        bg.direction,
        canvas.width_f64(),
        canvas.height_f64(),
    )
}

/// Text fill gradient over one line box of the live object (`width x font_size * line_height`).
pub fn text_gradient(
    tg: &TextGradient,
    live_width: f64,
    live_font_size: f64,
    line_height: f64,
) -> FillDescriptor {
    linear_gradient(
        &tg.color1,
        &tg.color2,
        tg.direction,
        live_width,
        live_font_size * line_height,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/codec/gradient.rs"]
mod tests;
