use serde::{Deserialize, Serialize};

use crate::foundation::core::CanvasSize;
use crate::foundation::error::{PostkitError, PostkitResult};
use crate::scene::model::{
    BgGradientConfig, DEFAULT_BG_COLOR, FadeConfig, LogoConfig, SceneDescription,
    TextLayerConfig, VignetteConfig,
};

/// A named, persisted snapshot of a whole scene (no bitmap data).
///
/// The JSON shape is the on-disk template format. Documents written before the fade overlay
/// was renamed carry it as `gradientConfig`; that field is read as `fadeConfig` whenever the
/// current field is absent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "TemplateWire")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub text_configs: Vec<TextLayerConfig>,
    pub logo_config: LogoConfig,
    pub fade_config: FadeConfig,
    pub vignette_config: VignetteConfig,
    pub bg_gradient_config: BgGradientConfig,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub bg_color: String,
    pub image_padding: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TemplateWire {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default, alias = "textLayers")]
    text_configs: Vec<TextLayerConfig>,
    #[serde(default)]
    logo_config: LogoConfig,
    #[serde(default)]
    fade_config: Option<FadeConfig>,
    #[serde(default)]
    gradient_config: Option<FadeConfig>,
    #[serde(default)]
    vignette_config: Option<VignetteConfig>,
    #[serde(default)]
    bg_gradient_config: Option<BgGradientConfig>,
    #[serde(default)]
    canvas_width: u32,
    #[serde(default)]
    canvas_height: u32,
    #[serde(default)]
    bg_color: String,
    #[serde(default)]
    image_padding: f64,
}

impl From<TemplateWire> for Template {
    fn from(w: TemplateWire) -> Self {
        let bg_color = if w.bg_color.trim().is_empty() {
            DEFAULT_BG_COLOR.to_owned()
        } else {
            w.bg_color
        };
        Self {
            id: w.id,
            name: w.name,
            text_configs: w.text_configs,
            logo_config: w.logo_config,
            fade_config: w.fade_config.or(w.gradient_config).unwrap_or_default(),
            vignette_config: w.vignette_config.unwrap_or_default(),
            bg_gradient_config: w.bg_gradient_config.unwrap_or_default(),
            canvas_width: w.canvas_width,
            canvas_height: w.canvas_height,
            bg_color,
            image_padding: w.image_padding,
        }
    }
}

impl Template {
    /// Snapshot a scene under the given id and name.
    pub fn from_scene(id: impl Into<String>, name: impl Into<String>, scene: &SceneDescription) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            text_configs: scene.text_layers.clone(),
            logo_config: scene.logo,
            fade_config: scene.fade.clone(),
            vignette_config: scene.vignette.clone(),
            bg_gradient_config: scene.bg_gradient.clone(),
            canvas_width: scene.canvas.width,
            canvas_height: scene.canvas.height,
            bg_color: scene.bg_color.clone(),
            image_padding: scene.image_padding,
        }
    }

    /// Structural checks applied on import and before applying.
    pub fn validate(&self) -> PostkitResult<()> {
        if self.text_configs.is_empty() {
            return Err(PostkitError::template(format!(
                "template '{}' has no text layers",
                self.name
            )));
        }
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(PostkitError::template(format!(
                "template '{}' has a non-positive canvas size",
                self.name
            )));
        }
        Ok(())
    }

    pub fn canvas(&self) -> PostkitResult<CanvasSize> {
        CanvasSize::new(self.canvas_width, self.canvas_height)
    }

    /// The scene this template describes.
    pub fn scene(&self) -> PostkitResult<SceneDescription> {
        self.validate()?;
        let scene = SceneDescription {
            canvas: self.canvas()?,
            bg_color: self.bg_color.clone(),
            bg_gradient: self.bg_gradient_config.clone(),
            image_padding: self.image_padding,
            fade: self.fade_config.clone(),
            vignette: self.vignette_config.clone(),
            text_layers: self.text_configs.clone(),
            logo: self.logo_config,
        };
        scene.validate()?;
        Ok(scene)
    }

    pub fn from_json_str(s: &str) -> PostkitResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn to_json_pretty(&self) -> PostkitResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/template.rs"]
mod tests;
