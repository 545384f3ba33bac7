//! Z-order discipline shared by the interactive engine and the headless renderer.
//!
//! Bottom to top: background image, fade, vignette, text layers in list order, logo. The
//! overlays always sit directly above the image (or at the bottom when there is none), with
//! the vignette above the fade no matter which was set last.

use crate::assets::decode::Bitmap;
use crate::codec::gradient::bg_gradient;
use crate::codec::placement::{fade_overlay, logo_object, place_image, vignette_overlay};
use crate::codec::style::to_live_style;
use crate::scene::model::{BgGradientConfig, SceneDescription};
use crate::surface::graph::Surface;
use crate::surface::objects::{
    ImageLayerHandle, LogoHandle, OverlayHandle, TextLayerHandle,
};

/// Handles of every live object, in their layer roles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayerHandles {
    pub image: Option<ImageLayerHandle>,
    pub fade: Option<OverlayHandle>,
    pub vignette: Option<OverlayHandle>,
    /// Parallel to the scene's text layer list.
    pub texts: Vec<TextLayerHandle>,
    pub logo: Option<LogoHandle>,
}

impl LayerHandles {
    /// Move the overlays back to their slot right above the image.
    pub fn restack_overlays(&self, surface: &mut Surface) {
        let image = self.image.map(|h| h.id());
        let mut anchor = image;
        if let Some(f) = self.fade {
            surface.move_above(f.id(), anchor);
            anchor = Some(f.id());
        }
        if let Some(v) = self.vignette {
            surface.move_above(v.id(), anchor);
        }
    }

    /// Index at which a new text object lands on top of the text stack.
    pub fn text_insert_index(&self, surface: &Surface) -> usize {
        self.logo
            .and_then(|l| surface.index_of(l.id()))
            .unwrap_or(surface.len())
    }

}

/// Set the base plate color and optional gradient.
pub fn apply_background(surface: &mut Surface, color: &str, gradient: &BgGradientConfig) {
    surface.background.color = color.to_owned();
    surface.background.gradient = gradient
        .enabled
        .then(|| bg_gradient(gradient, surface.size()));
}

/// Populate an empty surface bottom-up from a scene.
pub fn populate(
    surface: &mut Surface,
    scene: &SceneDescription,
    image: Option<&Bitmap>,
    logo: Option<&Bitmap>,
) -> LayerHandles {
    let canvas = surface.size();
    let mut handles = LayerHandles {
        image: image.map(|b| {
            surface.insert_image(0, place_image(b.clone(), canvas, scene.image_padding))
        }),
        ..LayerHandles::default()
    };
    populate_layers(surface, &mut handles, scene, logo);
    handles
}

/// Add background plate, overlays, text layers and logo on top of whatever the surface holds
/// (at most the background image). Replaces those handles in `handles`.
pub fn populate_layers(
    surface: &mut Surface,
    handles: &mut LayerHandles,
    scene: &SceneDescription,
    logo: Option<&Bitmap>,
) {
    let canvas = surface.size();
    apply_background(surface, &scene.bg_color, &scene.bg_gradient);

    handles.fade = scene
        .fade
        .enabled
        .then(|| surface.insert_overlay(surface.len(), fade_overlay(&scene.fade, canvas)));
    handles.vignette = scene.vignette.enabled.then(|| {
        surface.insert_overlay(surface.len(), vignette_overlay(&scene.vignette, canvas))
    });
    handles.texts = scene
        .text_layers
        .iter()
        .map(|cfg| surface.insert_text(surface.len(), to_live_style(cfg)))
        .collect();
    handles.logo = logo.filter(|_| scene.logo.enabled).map(|b| {
        surface.insert_logo(surface.len(), logo_object(b.clone(), &scene.logo))
    });
}

#[cfg(test)]
#[path = "../../tests/unit/surface/stack.rs"]
mod tests;
