use std::sync::Arc;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{PostkitError, PostkitResult};

/// A decoded user bitmap in premultiplied RGBA8 form.
///
/// Cloning is cheap; pixel storage is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Wrap already premultiplied pixels, validating the buffer length.
    pub fn from_rgba8_premul(width: u32, height: u32, data: Vec<u8>) -> PostkitResult<Self> {
        if width == 0 || height == 0 {
            return Err(PostkitError::decode("bitmap has zero width or height"));
        }
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if data.len() != expected {
            return Err(PostkitError::decode(format!(
                "bitmap byte len {} does not match {width}x{height}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        })
    }

    /// A bitmap filled with a single color.
    pub fn solid(width: u32, height: u32, color: Rgba8Premul) -> PostkitResult<Self> {
        let px = (width as usize).saturating_mul(height as usize);
        let mut data = Vec::with_capacity(px.saturating_mul(4));
        for _ in 0..px {
            data.extend_from_slice(&color.to_array());
        }
        Self::from_rgba8_premul(width, height, data)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.rgba8_premul.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Decode encoded raster bytes (PNG, JPEG, ...) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PostkitResult<Bitmap> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PostkitError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Bitmap::from_rgba8_premul(width, height, rgba8_premul)
}

/// Decode logo artwork, which may be a raster image or an SVG document.
///
/// SVGs are rasterized at their intrinsic size.
pub fn decode_logo(bytes: &[u8]) -> PostkitResult<Bitmap> {
    match decode_image(bytes) {
        Ok(bmp) => Ok(bmp),
        Err(raster_err) => {
            let opts = usvg::Options::default();
            let tree = usvg::Tree::from_data(bytes, &opts).map_err(|svg_err| {
                PostkitError::decode(format!(
                    "logo is neither a raster image ({raster_err}) nor an svg ({svg_err})"
                ))
            })?;
            rasterize_svg(&tree)
        }
    }
}

fn rasterize_svg(tree: &usvg::Tree) -> PostkitResult<Bitmap> {
    fn to_px(v: f32) -> PostkitResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(PostkitError::decode("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let width = to_px(size.width())?;
    let height = to_px(size.height())?;

    const MAX_DIM: u32 = 8_192;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(PostkitError::decode(format!(
            "svg raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PostkitError::decode("failed to allocate svg pixmap"))?;
    let sx = (width as f32) / size.width();
    let sy = (height as f32) / size.height();
    resvg::render(
        tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    // tiny-skia pixmaps are already premultiplied RGBA8.
    Bitmap::from_rgba8_premul(width, height, pixmap.data().to_vec())
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
