//! Conversion between logical text configs and live text objects.
//!
//! Interactive resize changes a text object's scale, not its font size, stroke width or wrap
//! width. Logical values are therefore recovered by multiplying live values by the current
//! scale (`sy` for font size and stroke width, `sx` for width), and incoming logical values
//! are divided by the current scale before they are written.

use crate::assets::color::optional_color;
use crate::codec::gradient::{FillDescriptor, text_gradient};
use crate::foundation::math::round1;
use crate::scene::model::{
    FontStyle, TextAlign, TextGradient, TextLayerConfig, TextTransform,
};
use crate::surface::objects::{TextFill, TextObject};

/// Display form of `content` under `transform`. The raw content is never rewritten.
pub fn apply_text_transform(content: &str, transform: TextTransform) -> String {
    match transform {
        TextTransform::None => content.to_owned(),
        TextTransform::Uppercase => content.to_uppercase(),
        TextTransform::Lowercase => content.to_lowercase(),
        TextTransform::Capitalize => {
            let mut out = String::with_capacity(content.len());
            let mut prev_word = false;
            for c in content.chars() {
                let word = c.is_alphanumeric() || c == '_';
                if word && !prev_word {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                prev_word = word;
            }
            out
        }
    }
}

/// Build a fresh live object (scale 1) from a logical config.
pub fn to_live_style(config: &TextLayerConfig) -> TextObject {
    let mut obj = TextObject::new(
        apply_text_transform(&config.content, config.text_transform),
        config.font_size,
        config.stroke_width,
        config.width,
    );
    obj.left = config.x;
    obj.top = config.y;
    obj.font_family = config.font_family.clone();
    obj.font_weight = config.font_weight.clone();
    obj.font_style = config.font_style;
    obj.background_color = config.background_color.clone();
    obj.text_align = config.text_align;
    obj.opacity = config.opacity;
    obj.line_height = config.line_height;
    obj.char_spacing = config.char_spacing;
    obj.stroke_color = config.stroke_color.clone();
    obj.shadow = config.shadow;
    obj.fill = TextFill::Solid(config.fill.clone());
    if let Some(g) = config.active_gradient() {
        obj.fill = TextFill::Gradient(live_gradient_fill(&obj, g));
    }
    obj.init_dimensions();
    obj
}

/// Gradient fill sized to the object's current live box.
pub fn live_gradient_fill(obj: &TextObject, g: &TextGradient) -> FillDescriptor {
    text_gradient(g, obj.live_width(), obj.live_font_size(), obj.line_height)
}

/// Recover the logical config of a live object.
///
/// `prev` supplies the text transform, the raw content when the display text is unchanged,
/// and fallbacks for values the live object cannot report.
pub fn from_live_style(
    obj: &TextObject,
    prev: &TextLayerConfig,
    gradient: Option<&TextGradient>,
) -> TextLayerConfig {
    let (sx, sy) = obj.scale();
    let content = if obj.text.is_empty()
        || obj.text == apply_text_transform(&prev.content, prev.text_transform)
    {
        prev.content.clone()
    } else {
        obj.text.clone()
    };
    let fill = match &obj.fill {
        TextFill::Solid(c) if optional_color(c).is_some() => c.clone(),
        _ => prev.fill.clone(),
    };
    TextLayerConfig {
        content,
        x: finite_or(obj.left, prev.x),
        y: finite_or(obj.top, prev.y),
        font_size: (obj.live_font_size() * sy).round(),
        font_family: non_empty_or(&obj.font_family, &prev.font_family),
        font_weight: non_empty_or(&obj.font_weight, &prev.font_weight),
        font_style: obj.font_style,
        text_transform: prev.text_transform,
        fill,
        fill_gradient: gradient.cloned(),
        background_color: obj.background_color.clone(),
        text_align: obj.text_align,
        width: (obj.live_width() * sx).round(),
        opacity: finite_or(obj.opacity, prev.opacity),
        line_height: if obj.line_height.is_finite() && obj.line_height > 0.0 {
            obj.line_height
        } else {
            prev.line_height
        },
        char_spacing: finite_or(obj.char_spacing, prev.char_spacing),
        stroke_color: obj.stroke_color.clone(),
        stroke_width: round1(obj.live_stroke_width() * sy),
        shadow: obj.shadow,
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

fn non_empty_or(v: &str, fallback: &str) -> String {
    if v.trim().is_empty() {
        fallback.to_owned()
    } else {
        v.to_owned()
    }
}

/// Partial update of a text layer, in logical units.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextStyleUpdate {
    pub content: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<String>,
    pub font_style: Option<FontStyle>,
    pub text_transform: Option<TextTransform>,
    pub fill: Option<String>,
    pub background_color: Option<String>,
    pub text_align: Option<TextAlign>,
    pub width: Option<f64>,
    pub opacity: Option<f64>,
    pub line_height: Option<f64>,
    pub char_spacing: Option<f64>,
    pub stroke_color: Option<String>,
    pub stroke_width: Option<f64>,
    pub shadow: Option<bool>,
}

impl TextStyleUpdate {
    /// Whether the update touches fields that only the cached config can hold.
    pub fn touches_content(&self) -> bool {
        self.content.is_some() || self.text_transform.is_some()
    }
}

/// Write a logical update onto a live object, compensating for its current scale.
///
/// A gradient fill stays a gradient (resized to the new box); callers switch between solid and
/// gradient fills through [`live_gradient_fill`].
pub fn apply_update(obj: &mut TextObject, update: &TextStyleUpdate, prev: &TextLayerConfig) {
    let (sx, sy) = obj.scale();
    let sx = if sx.abs() > f64::EPSILON { sx } else { 1.0 };
    let sy = if sy.abs() > f64::EPSILON { sy } else { 1.0 };

    if let Some(v) = update.font_size {
        obj.set_live_font_size(v / sy);
    }
    if let Some(v) = update.stroke_width {
        obj.set_live_stroke_width(v / sy);
    }
    if let Some(v) = update.width {
        obj.set_live_width(v / sx);
    }
    if update.touches_content() {
        let raw = update.content.as_deref().unwrap_or(&prev.content);
        let transform = update.text_transform.unwrap_or(prev.text_transform);
        obj.text = apply_text_transform(raw, transform);
    }
    if let Some(v) = update.x {
        obj.left = v;
    }
    if let Some(v) = update.y {
        obj.top = v;
    }
    if let Some(v) = &update.font_family {
        obj.font_family = v.clone();
    }
    if let Some(v) = &update.font_weight {
        obj.font_weight = v.clone();
    }
    if let Some(v) = update.font_style {
        obj.font_style = v;
    }
    if let Some(v) = &update.fill {
        if matches!(obj.fill, TextFill::Solid(_)) {
            obj.fill = TextFill::Solid(v.clone());
        }
    }
    if let Some(v) = &update.background_color {
        obj.background_color = v.clone();
    }
    if let Some(v) = update.text_align {
        obj.text_align = v;
    }
    if let Some(v) = update.opacity {
        obj.opacity = v;
    }
    if let Some(v) = update.line_height {
        obj.line_height = v;
    }
    if let Some(v) = update.char_spacing {
        obj.char_spacing = v;
    }
    if let Some(v) = &update.stroke_color {
        obj.stroke_color = v.clone();
        if update.stroke_width.is_none()
            && optional_color(v).is_some()
            && obj.live_stroke_width() == 0.0
        {
            obj.set_live_stroke_width(1.0 / sy);
        }
    }
    if let Some(v) = update.shadow {
        obj.shadow = v;
    }
    obj.init_dimensions();
}

#[cfg(test)]
#[path = "../../tests/unit/codec/style.rs"]
mod tests;
