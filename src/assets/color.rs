use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PostkitError, PostkitResult};
use crate::foundation::math::unit_to_u8;

/// Straight (non-premultiplied) sRGB color with a fractional alpha.
///
/// This is the "alpha-tagged" color used by gradient stops: an RGB triple parsed from a
/// `#RRGGBB` string paired with a caller-supplied alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl ColorRgba {
    pub const BLACK: Self = Self::rgba(0, 0, 0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0.0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB with a different alpha.
    pub fn with_alpha(self, a: f64) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    pub fn to_rgba8_premul(self) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, unit_to_u8(self.a))
    }

    pub fn to_vello(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, unit_to_u8(self.a))
    }
}

impl std::fmt::Display for ColorRgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}

/// Parse `#RRGGBB` (leading `#` optional, case-insensitive) and pair it with `alpha`.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> PostkitResult<ColorRgba> {
    let s = hex.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return Err(PostkitError::validation(format!(
            "color \"{hex}\" must be #RRGGBB"
        )));
    }

    fn hex_byte(pair: &str) -> PostkitResult<u8> {
        u8::from_str_radix(pair, 16)
            .map_err(|_| PostkitError::validation(format!("invalid hex byte \"{pair}\"")))
    }

    Ok(ColorRgba::rgba(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
        alpha.clamp(0.0, 1.0),
    ))
}

/// Lenient variant used while painting: invalid strings render as black.
pub(crate) fn hex_to_rgba_or_black(hex: &str, alpha: f64) -> ColorRgba {
    hex_to_rgba(hex, alpha).unwrap_or_else(|e| {
        tracing::warn!(color = hex, error = %e, "invalid color, painting black");
        ColorRgba::BLACK.with_alpha(alpha)
    })
}

/// Empty strings mean "no color" (no background plate, no stroke).
pub(crate) fn optional_color(hex: &str) -> Option<&str> {
    let t = hex.trim();
    (!t.is_empty()).then_some(t)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
