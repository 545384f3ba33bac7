use image::ImageEncoder;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{PostkitError, PostkitResult};
use crate::foundation::math::mul_div255_u8;
use crate::surface::raster::FrameRGBA;

/// Raster export format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterFormat {
    /// Lossless with alpha.
    #[default]
    Png,
    /// Opaque, maximum quality. Transparent pixels come out black.
    Jpeg,
}

impl RasterFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }

    /// Pick a format from a file extension (`png`, `jpg`, `jpeg`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

const JPEG_QUALITY: u8 = 100;

/// Serialize a rendered frame. Output dimensions always equal the frame's.
pub fn encode_frame(frame: &FrameRGBA, format: RasterFormat) -> PostkitResult<Vec<u8>> {
    let expected = (frame.width as usize) * (frame.height as usize) * 4;
    if frame.data.len() != expected {
        return Err(PostkitError::encode(format!(
            "frame byte len {} does not match {}x{}",
            frame.data.len(),
            frame.width,
            frame.height
        )));
    }

    let mut out = Vec::new();
    match format {
        RasterFormat::Png => {
            let straight = if frame.premultiplied {
                unpremultiply(&frame.data)
            } else {
                frame.data.clone()
            };
            image::codecs::png::PngEncoder::new(&mut out)
                .write_image(
                    &straight,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgba8,
                )
                .map_err(|e| PostkitError::encode(format!("png: {e}")))?;
        }
        RasterFormat::Jpeg => {
            // Premultiplied RGB is the frame composited over black.
            let rgb: Vec<u8> = frame
                .data
                .chunks_exact(4)
                .flat_map(|px| {
                    if frame.premultiplied {
                        [px[0], px[1], px[2]]
                    } else {
                        let a = u16::from(px[3]);
                        let m = |c: u8| mul_div255_u8(u16::from(c), a);
                        [m(px[0]), m(px[1]), m(px[2])]
                    }
                })
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY)
                .write_image(
                    &rgb,
                    frame.width,
                    frame.height,
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| PostkitError::encode(format!("jpeg: {e}")))?;
        }
    }
    Ok(out)
}

fn unpremultiply(data: &[u8]) -> Vec<u8> {
    let mut out = data.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[..3].fill(0);
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/surface/encode.rs"]
mod tests;
