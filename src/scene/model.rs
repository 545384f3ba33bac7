use serde::{Deserialize, Serialize};

use crate::foundation::core::{CanvasSize, Point};
use crate::foundation::error::{PostkitError, PostkitResult};

/// Edge a linear gradient runs toward (or, for fades, the edge it starts from).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    #[default]
    Bottom,
    Top,
    Left,
    Right,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 4] = [Self::Bottom, Self::Top, Self::Left, Self::Right];
}

/// Display-only transform applied to a text layer's raw content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTransform {
    #[default]
    None,
    Uppercase,
    Lowercase,
    Capitalize,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    /// Fraction of the free line space placed before the line.
    pub fn factor(self) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Center => 0.5,
            Self::Right => 1.0,
        }
    }
}

/// Two-color fill gradient for text. When enabled it replaces the solid fill for display.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextGradient {
    pub enabled: bool,
    pub color1: String,
    pub color2: String,
    #[serde(default)]
    pub direction: GradientDirection,
}

/// Logical (pre-scale) configuration of one text layer.
///
/// Order in the scene's layer list is the stacking order (later = frontmost).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextLayerConfig {
    /// Raw content; `text_transform` never rewrites it.
    pub content: String,
    /// Top-left anchor in canvas pixels.
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_family: String,
    /// `"normal"`, `"bold"` or a numeric weight string.
    pub font_weight: String,
    pub font_style: FontStyle,
    pub text_transform: TextTransform,
    /// Solid fill color (`#RRGGBB`).
    #[serde(alias = "fillColor")]
    pub fill: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_gradient: Option<TextGradient>,
    /// Background plate color; empty means none.
    pub background_color: String,
    pub text_align: TextAlign,
    /// Wrap width in logical pixels.
    pub width: f64,
    pub opacity: f64,
    pub line_height: f64,
    /// Tracking in 1/1000 em; may be negative.
    pub char_spacing: f64,
    /// Empty means no stroke.
    pub stroke_color: String,
    pub stroke_width: f64,
    pub shadow: bool,
}

impl Default for TextLayerConfig {
    fn default() -> Self {
        Self {
            content: "Your text here".to_owned(),
            x: 290.0,
            y: 900.0,
            font_size: 36.0,
            font_family: "Arial".to_owned(),
            font_weight: "bold".to_owned(),
            font_style: FontStyle::Normal,
            text_transform: TextTransform::None,
            fill: "#ffffff".to_owned(),
            fill_gradient: None,
            background_color: String::new(),
            text_align: TextAlign::Center,
            width: 500.0,
            opacity: 1.0,
            line_height: 1.3,
            char_spacing: 0.0,
            stroke_color: String::new(),
            stroke_width: 0.0,
            shadow: false,
        }
    }
}

impl TextLayerConfig {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The gradient currently overriding the solid fill, if any.
    pub fn active_gradient(&self) -> Option<&TextGradient> {
        self.fill_gradient.as_ref().filter(|g| g.enabled)
    }
}

/// The single brand logo layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogoConfig {
    pub enabled: bool,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            x: 880.0,
            y: 880.0,
            scale: 0.15,
            opacity: 1.0,
        }
    }
}

/// Directional darkening overlay fading from one edge into transparency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FadeConfig {
    pub enabled: bool,
    pub direction: GradientDirection,
    /// Opacity at the named edge, `0..=1`.
    pub opacity: f64,
    pub color: String,
    /// Percent of the canvas extent covered, `0..=100`.
    pub coverage: f64,
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            direction: GradientDirection::Bottom,
            opacity: 0.7,
            color: "#000000".to_owned(),
            coverage: 60.0,
        }
    }
}

/// Radial darkening overlay centered on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VignetteConfig {
    pub enabled: bool,
    /// Opacity at the outer edge, `0..=1`.
    pub strength: f64,
    /// Outer radius as percent of the canvas' longer side, `20..=100`.
    pub size: f64,
    pub color: String,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            strength: 0.5,
            size: 70.0,
            color: "#000000".to_owned(),
        }
    }
}

/// Full-canvas two-color gradient painted as the base plate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BgGradientConfig {
    pub enabled: bool,
    pub color1: String,
    pub color2: String,
    pub direction: GradientDirection,
}

impl Default for BgGradientConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            color1: DEFAULT_BG_COLOR.to_owned(),
            color2: "#000000".to_owned(),
            direction: GradientDirection::Bottom,
        }
    }
}

pub const DEFAULT_BG_COLOR: &str = "#1a1a1a";

/// The two darkening overlays. Ordering is stacking order: vignette paints above fade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OverlayKind {
    Fade,
    Vignette,
}

/// Declarative description of one document, minus bitmap data.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneDescription {
    pub canvas: CanvasSize,
    pub bg_color: String,
    pub bg_gradient: BgGradientConfig,
    /// Symmetric inset of the background photo in canvas pixels.
    pub image_padding: f64,
    pub fade: FadeConfig,
    pub vignette: VignetteConfig,
    /// Never empty.
    pub text_layers: Vec<TextLayerConfig>,
    pub logo: LogoConfig,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            bg_color: DEFAULT_BG_COLOR.to_owned(),
            bg_gradient: BgGradientConfig::default(),
            image_padding: 0.0,
            fade: FadeConfig::default(),
            vignette: VignetteConfig::default(),
            text_layers: vec![TextLayerConfig::default()],
            logo: LogoConfig::default(),
        }
    }
}

impl SceneDescription {
    pub fn validate(&self) -> PostkitResult<()> {
        CanvasSize::new(self.canvas.width, self.canvas.height)?;
        if self.text_layers.is_empty() {
            return Err(PostkitError::validation(
                "scene must contain at least one text layer",
            ));
        }
        if !self.image_padding.is_finite() {
            return Err(PostkitError::validation("image padding must be finite"));
        }
        for (i, t) in self.text_layers.iter().enumerate() {
            if !t.font_size.is_finite() || t.font_size <= 0.0 {
                return Err(PostkitError::validation(format!(
                    "text layer {i}: font size must be > 0"
                )));
            }
            if !t.line_height.is_finite() || t.line_height <= 0.0 {
                return Err(PostkitError::validation(format!(
                    "text layer {i}: line height must be > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
