use crate::foundation::error::{PostkitError, PostkitResult};

pub use kurbo::{Affine, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
///
/// Absolute layer coordinates are defined relative to this extent, so changing it forces a
/// full live-object rebuild.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    /// Width in pixels (> 0).
    pub width: u32,
    /// Height in pixels (> 0).
    pub height: u32,
}

/// A named canvas size offered to users.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanvasPreset {
    /// Display label.
    pub label: &'static str,
    /// Short label used on compact controls.
    pub short: &'static str,
    /// Preset size.
    pub size: CanvasSize,
}

impl CanvasSize {
    /// Built-in presets, square post first.
    pub const PRESETS: [CanvasPreset; 5] = [
        CanvasPreset {
            label: "IG Post",
            short: "IG",
            size: CanvasSize::square(1080),
        },
        CanvasPreset {
            label: "IG Story",
            short: "Story",
            size: CanvasSize {
                width: 1080,
                height: 1920,
            },
        },
        CanvasPreset {
            label: "Twitter",
            short: "X",
            size: CanvasSize {
                width: 1200,
                height: 675,
            },
        },
        CanvasPreset {
            label: "Facebook",
            short: "FB",
            size: CanvasSize {
                width: 1200,
                height: 630,
            },
        },
        CanvasPreset {
            label: "YouTube",
            short: "YT",
            size: CanvasSize {
                width: 1280,
                height: 720,
            },
        },
    ];

    /// Build a validated size.
    pub fn new(width: u32, height: u32) -> PostkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostkitError::validation(
                "canvas width and height must be > 0",
            ));
        }
        // The CPU rasterizer addresses pixmaps with u16 dimensions.
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(PostkitError::validation(format!(
                "canvas size {width}x{height} exceeds {max}x{max}",
                max = u16::MAX
            )));
        }
        Ok(Self { width, height })
    }

    /// Square canvas. `side` is not validated.
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Look up a preset by its label or short label (case-insensitive).
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS
            .iter()
            .find(|p| p.label.eq_ignore_ascii_case(name) || p.short.eq_ignore_ascii_case(name))
            .map(|p| p.size)
    }

    /// The preset matching this size, if any.
    pub fn matching_preset(self) -> Option<&'static CanvasPreset> {
        Self::PRESETS.iter().find(|p| p.size == self)
    }

    pub fn width_f64(self) -> f64 {
        f64::from(self.width)
    }

    pub fn height_f64(self) -> f64 {
        f64::from(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.width_f64() / 2.0, self.height_f64() / 2.0)
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::square(1080)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
