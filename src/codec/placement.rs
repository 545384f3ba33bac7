use crate::assets::decode::Bitmap;
use crate::codec::gradient::{FillDescriptor, fade_gradient, vignette_gradient};
use crate::foundation::core::{CanvasSize, Point, Vec2};
use crate::scene::model::{FadeConfig, LogoConfig, OverlayKind, VignetteConfig};
use crate::surface::objects::{ImageObject, LogoObject, OverlayObject};

/// Result of fitting a bitmap over the padded canvas rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverPlacement {
    /// Uniform scale applied to the source bitmap.
    pub scale: f64,
    /// Center of the placed image in canvas pixels.
    pub center: Point,
    /// Centered clip size in image-local pixels; `None` when padding is zero.
    pub clip: Option<Vec2>,
}

/// Cover-fit `img_w x img_h` over the canvas inset by `padding` on every side.
///
/// `scale = max(availW / imgW, availH / imgH)`; the image is centered on the canvas. With a
/// positive padding the overflow is cropped by a centered clip of `avail / scale` in
/// image-local space. A negative padding grows the covered rectangle past the canvas edges.
pub fn cover_fit(img_w: u32, img_h: u32, canvas: CanvasSize, padding: f64) -> CoverPlacement {
    let padding = if padding.is_finite() { padding } else { 0.0 };
    let avail_w = (canvas.width_f64() - 2.0 * padding).max(1.0);
    let avail_h = (canvas.height_f64() - 2.0 * padding).max(1.0);
    let iw = f64::from(img_w.max(1));
    let ih = f64::from(img_h.max(1));
    let scale = (avail_w / iw).max(avail_h / ih);
    let clip = (padding > 0.0).then(|| Vec2::new(avail_w / scale, avail_h / scale));
    CoverPlacement {
        scale,
        center: canvas.center(),
        clip,
    }
}

/// Background image object placed by [`cover_fit`].
pub fn place_image(bitmap: Bitmap, canvas: CanvasSize, padding: f64) -> ImageObject {
    let mut obj = ImageObject {
        bitmap,
        center: canvas.center(),
        scale_x: 1.0,
        scale_y: 1.0,
        clip: None,
        opacity: 1.0,
    };
    refit_image(&mut obj, canvas, padding);
    obj
}

/// Re-run cover fit on an existing image. Recenters and rescales unconditionally.
pub fn refit_image(obj: &mut ImageObject, canvas: CanvasSize, padding: f64) {
    let p = cover_fit(obj.bitmap.width, obj.bitmap.height, canvas, padding);
    obj.center = p.center;
    obj.scale_x = p.scale;
    obj.scale_y = p.scale;
    obj.clip = p.clip;
}

pub fn logo_object(bitmap: Bitmap, cfg: &LogoConfig) -> LogoObject {
    LogoObject {
        bitmap,
        left: cfg.x,
        top: cfg.y,
        scale_x: cfg.scale,
        scale_y: cfg.scale,
        opacity: cfg.opacity,
    }
}

/// Logo geometry as the user last left it. Horizontal scale is the reported scale.
pub fn read_logo(obj: &LogoObject, enabled: bool) -> LogoConfig {
    LogoConfig {
        enabled,
        x: obj.left,
        y: obj.top,
        scale: obj.scale_x,
        opacity: obj.opacity,
    }
}

fn overlay(kind: OverlayKind, fill: FillDescriptor, canvas: CanvasSize) -> OverlayObject {
    OverlayObject {
        kind,
        width: canvas.width_f64(),
        height: canvas.height_f64(),
        fill,
    }
}

pub fn fade_overlay(fc: &FadeConfig, canvas: CanvasSize) -> OverlayObject {
    overlay(OverlayKind::Fade, fade_gradient(fc, canvas), canvas)
}

pub fn vignette_overlay(vc: &VignetteConfig, canvas: CanvasSize) -> OverlayObject {
    overlay(OverlayKind::Vignette, vignette_gradient(vc, canvas), canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/placement.rs"]
mod tests;
