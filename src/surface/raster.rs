use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::color::{ColorRgba, hex_to_rgba_or_black, optional_color};
use crate::assets::decode::Bitmap;
use crate::assets::fonts::{FontBook, TextLayoutEngine, is_bold_weight};
use crate::codec::gradient::FillDescriptor;
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::foundation::error::{PostkitError, PostkitResult};
use crate::scene::model::FontStyle;
use crate::surface::blur::blur_rgba8_premul;
use crate::surface::graph::Surface;
use crate::surface::objects::{SurfaceObject, TextFill, TextObject};

/// Rendered canvas pixels, row-major RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Renderer settings shared by the interactive and headless paths.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Color of selection outlines and handles in previews.
    pub chrome_color: ColorRgba,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            chrome_color: ColorRgba::rgba(0x4f, 0x8e, 0xf7, 1.0),
        }
    }
}

const SHADOW_COLOR: [u8; 4] = [0, 0, 0, 153];
const SHADOW_OFFSET: (f64, f64) = (2.0, 2.0);
const SHADOW_BLUR_RADIUS: u32 = 9;
const SHADOW_BLUR_SIGMA: f32 = 3.0;
const IMAGE_CACHE_CAP: usize = 8;

/// CPU rasterizer for a [`Surface`].
pub struct SurfaceRenderer {
    fonts: FontBook,
    text: TextLayoutEngine,
    settings: RenderSettings,
    images: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
    warned_no_fonts: bool,
}

struct GlyphLine {
    glyphs: Vec<vello_cpu::Glyph>,
    advance: f32,
}

/// Unscaled box of shaped text: the wrap width (or a wider unbreakable line) by the line boxes.
fn text_box(t: &TextObject, lines: &[GlyphLine]) -> Rect {
    let widest = lines.iter().map(|l| f64::from(l.advance)).fold(0.0, f64::max);
    Rect::new(
        0.0,
        0.0,
        t.live_width().max(widest),
        lines.len().max(1) as f64 * t.line_box(),
    )
}

impl SurfaceRenderer {
    pub fn new(fonts: FontBook, settings: RenderSettings) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
            settings,
            images: HashMap::new(),
            warned_no_fonts: false,
        }
    }

    pub fn fonts(&self) -> &FontBook {
        &self.fonts
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Rasterize every object bottom to top at the surface's native size.
    ///
    /// With `chrome` set, the active object gets a selection outline.
    pub fn render(&mut self, surface: &Surface, chrome: bool) -> PostkitResult<FrameRGBA> {
        let size = surface.size();
        let w: u16 = size
            .width
            .try_into()
            .map_err(|_| PostkitError::validation("canvas width exceeds u16"))?;
        let h: u16 = size
            .height
            .try_into()
            .map_err(|_| PostkitError::validation("canvas height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        let canvas_rect = Rect::new(0.0, 0.0, size.width_f64(), size.height_f64());

        reset(&mut ctx, Affine::IDENTITY);
        if let Some(c) = optional_color(&surface.background.color) {
            ctx.set_paint(hex_to_rgba_or_black(c, 1.0).to_vello());
            ctx.fill_rect(&rect_to_cpu(canvas_rect));
        }
        if let Some(g) = &surface.background.gradient {
            ctx.set_paint(gradient_image(g, size.width, size.height)?);
            ctx.fill_rect(&rect_to_cpu(canvas_rect));
        }

        for (_, obj) in surface.iter() {
            self.draw_object(&mut ctx, obj, size.width, size.height)?;
        }

        if chrome {
            if let Some(active) = surface.active().and_then(|id| surface.get(id)) {
                self.draw_chrome(&mut ctx, active.bounds());
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_object(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        obj: &SurfaceObject,
        canvas_w: u32,
        canvas_h: u32,
    ) -> PostkitResult<()> {
        match obj {
            SurfaceObject::Image(i) => {
                let paint = self.image_paint(&i.bitmap)?;
                reset(ctx, i.transform());
                ctx.set_paint(paint);
                with_opacity(ctx, i.opacity, |ctx| {
                    ctx.fill_rect(&rect_to_cpu(i.source_rect()));
                });
            }
            SurfaceObject::Overlay(o) => {
                reset(ctx, Affine::IDENTITY);
                ctx.set_paint(gradient_image(&o.fill, canvas_w, canvas_h)?);
                ctx.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, o.width, o.height)));
            }
            SurfaceObject::Logo(l) => {
                let paint = self.image_paint(&l.bitmap)?;
                reset(ctx, l.transform());
                ctx.set_paint(paint);
                let r = Rect::new(
                    0.0,
                    0.0,
                    f64::from(l.bitmap.width),
                    f64::from(l.bitmap.height),
                );
                with_opacity(ctx, l.opacity, |ctx| ctx.fill_rect(&rect_to_cpu(r)));
            }
            SurfaceObject::Text(t) => self.draw_text(ctx, t, canvas_w, canvas_h)?,
        }
        Ok(())
    }

    fn image_paint(&mut self, bitmap: &Bitmap) -> PostkitResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&bitmap.rgba8_premul) as usize;
        if let Some((_, img)) = self.images.get(&key) {
            return Ok(img.clone());
        }
        if self.images.len() >= IMAGE_CACHE_CAP {
            self.images.clear();
        }
        let img = premul_bytes_to_image(&bitmap.rgba8_premul, bitmap.width, bitmap.height)?;
        self.images
            .insert(key, (bitmap.rgba8_premul.clone(), img.clone()));
        Ok(img)
    }

    /// Layout box of `t` as it will be painted, or `None` when nothing can be shaped.
    pub fn measure_text(&mut self, t: &TextObject) -> PostkitResult<Option<Vec2>> {
        Ok(self.shape_lines(t)?.map(|(lines, _, _)| {
            let r = text_box(t, &lines);
            Vec2::new(r.width(), r.height())
        }))
    }

    /// Shape and position the object's glyphs in unscaled object-local space.
    fn shape_lines(
        &mut self,
        t: &TextObject,
    ) -> PostkitResult<Option<(Vec<GlyphLine>, vello_cpu::peniko::FontData, f32)>> {
        let size = t.live_font_size() as f32;
        if !size.is_finite() || size <= 0.0 || t.text.is_empty() {
            return Ok(None);
        }
        let spacing = (t.char_spacing / 1000.0 * t.live_font_size()) as f32;
        let shaped = self.text.layout(
            &self.fonts,
            &t.font_family,
            is_bold_weight(&t.font_weight),
            t.font_style == FontStyle::Italic,
            &t.text,
            size,
            spacing,
            t.live_width() as f32,
        )?;
        let Some(shaped) = shaped else {
            if !self.warned_no_fonts {
                tracing::warn!("no fonts registered, text layers are not painted");
                self.warned_no_fonts = true;
            }
            return Ok(None);
        };

        let line_box = t.line_box() as f32;
        let width = t.live_width() as f32;
        let align = t.text_align.factor();
        let mut lines = Vec::new();
        for (i, line) in shaped.layout.lines().enumerate() {
            let m = line.metrics();
            let dx = (width - m.advance).max(0.0) * align;
            let half_leading = (line_box - (m.ascent + m.descent)) / 2.0;
            let baseline = i as f32 * line_box + half_leading + m.ascent;
            let mut glyphs = Vec::new();
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x + dx,
                    y: g.y - m.baseline + baseline,
                }));
            }
            lines.push(GlyphLine {
                glyphs,
                advance: m.advance,
            });
        }
        Ok(Some((lines, shaped.font, size)))
    }

    fn draw_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        t: &TextObject,
        canvas_w: u32,
        canvas_h: u32,
    ) -> PostkitResult<()> {
        let shaped = self.shape_lines(t)?;
        let local = match &shaped {
            Some((lines, _, _)) => text_box(t, lines),
            None => Rect::new(0.0, 0.0, t.live_width(), t.line_box()),
        };

        reset(ctx, t.transform());
        let opacity = t.opacity.clamp(0.0, 1.0) as f32;
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }

        if let Some(bg) = optional_color(&t.background_color) {
            ctx.set_paint(hex_to_rgba_or_black(bg, 1.0).to_vello());
            ctx.fill_rect(&rect_to_cpu(local));
        }

        if let Some((lines, font, size)) = &shaped {
            if t.shadow {
                let bounds = t.transform().transform_rect_bbox(local);
                if let Some((img, at)) =
                    shadow_image(t, lines, font, *size, bounds, canvas_w, canvas_h)?
                {
                    reset(ctx, Affine::translate((at.x, at.y)));
                    let (iw, ih) = image_size(&img);
                    ctx.set_paint(img);
                    ctx.fill_rect(&rect_to_cpu(Rect::new(0.0, 0.0, iw, ih)));
                    reset(ctx, t.transform());
                }
            }

            match &t.fill {
                TextFill::Solid(c) => ctx.set_paint(hex_to_rgba_or_black(c, 1.0).to_vello()),
                TextFill::Gradient(g) => {
                    let gw = t.live_width().ceil().max(1.0) as u32;
                    let gh = t.line_box().ceil().max(1.0) as u32;
                    ctx.set_paint(gradient_image(g, gw, gh)?);
                }
            }
            for line in lines {
                ctx.glyph_run(font)
                    .font_size(*size)
                    .fill_glyphs(line.glyphs.iter().map(copy_glyph));
            }

            let stroke_w = t.live_stroke_width();
            if let Some(sc) = optional_color(&t.stroke_color).filter(|_| stroke_w > 0.0) {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(stroke_w));
                ctx.set_paint(hex_to_rgba_or_black(sc, 1.0).to_vello());
                for line in lines {
                    ctx.glyph_run(font)
                        .font_size(*size)
                        .stroke_glyphs(line.glyphs.iter().map(copy_glyph));
                }
            }
        }

        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn draw_chrome(&self, ctx: &mut vello_cpu::RenderContext, b: Rect) {
        reset(ctx, Affine::IDENTITY);
        ctx.set_paint(self.settings.chrome_color.to_vello());
        let t = 2.0;
        for edge in [
            Rect::new(b.x0 - t, b.y0 - t, b.x1 + t, b.y0),
            Rect::new(b.x0 - t, b.y1, b.x1 + t, b.y1 + t),
            Rect::new(b.x0 - t, b.y0, b.x0, b.y1),
            Rect::new(b.x1, b.y0, b.x1 + t, b.y1),
        ] {
            ctx.fill_rect(&rect_to_cpu(edge));
        }
        for corner in [
            Point::new(b.x0, b.y0),
            Point::new(b.x1, b.y0),
            Point::new(b.x0, b.y1),
            Point::new(b.x1, b.y1),
        ] {
            ctx.fill_rect(&rect_to_cpu(Rect::from_center_size(corner, (10.0, 10.0))));
        }
    }
}

/// Render the shadow glyphs offscreen, blur them and crop to the text's neighbourhood.
fn shadow_image(
    t: &TextObject,
    lines: &[GlyphLine],
    font: &vello_cpu::peniko::FontData,
    size: f32,
    bounds: Rect,
    canvas_w: u32,
    canvas_h: u32,
) -> PostkitResult<Option<(vello_cpu::Image, Point)>> {
    let margin = f64::from(SHADOW_BLUR_RADIUS) + 2.0;
    let region = Rect::new(
        (bounds.x0 + SHADOW_OFFSET.0 - margin).floor().max(0.0),
        (bounds.y0 + SHADOW_OFFSET.1 - margin).floor().max(0.0),
        (bounds.x1 + SHADOW_OFFSET.0 + margin).ceil().min(f64::from(canvas_w)),
        (bounds.y1 + SHADOW_OFFSET.1 + margin).ceil().min(f64::from(canvas_h)),
    );
    if region.width() < 1.0 || region.height() < 1.0 {
        return Ok(None);
    }
    let (rw, rh) = (region.width() as u16, region.height() as u16);

    let mut ctx = vello_cpu::RenderContext::new(rw, rh);
    reset(
        &mut ctx,
        Affine::translate((SHADOW_OFFSET.0 - region.x0, SHADOW_OFFSET.1 - region.y0))
            * t.transform(),
    );
    let [r, g, b, a] = SHADOW_COLOR;
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    for line in lines {
        ctx.glyph_run(font)
            .font_size(size)
            .fill_glyphs(line.glyphs.iter().map(copy_glyph));
    }
    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(rw, rh);
    ctx.render_to_pixmap(&mut pixmap);

    let blurred = blur_rgba8_premul(
        pixmap.data_as_u8_slice(),
        u32::from(rw),
        u32::from(rh),
        SHADOW_BLUR_RADIUS,
        SHADOW_BLUR_SIGMA,
    )?;
    let img = premul_bytes_to_image(&blurred, u32::from(rw), u32::from(rh))?;
    Ok(Some((img, Point::new(region.x0, region.y0))))
}

fn copy_glyph(g: &vello_cpu::Glyph) -> vello_cpu::Glyph {
    vello_cpu::Glyph {
        id: g.id,
        x: g.x,
        y: g.y,
    }
}

fn reset(ctx: &mut vello_cpu::RenderContext, transform: Affine) {
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
}

fn with_opacity(
    ctx: &mut vello_cpu::RenderContext,
    opacity: f64,
    f: impl FnOnce(&mut vello_cpu::RenderContext),
) {
    let o = opacity.clamp(0.0, 1.0) as f32;
    if o < 1.0 {
        ctx.push_opacity_layer(o);
        f(ctx);
        ctx.pop_layer();
    } else {
        f(ctx);
    }
}

/// Sample a fill descriptor at pixel centers into a `w x h` image paint.
fn gradient_image(fill: &FillDescriptor, w: u32, h: u32) -> PostkitResult<vello_cpu::Image> {
    let mut bytes = Vec::with_capacity((w as usize).saturating_mul(h as usize).saturating_mul(4));
    for y in 0..h {
        for x in 0..w {
            let c = fill.sample(Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5));
            bytes.extend_from_slice(&c.to_array());
        }
    }
    premul_bytes_to_image(&bytes, w, h)
}

fn image_size(image: &vello_cpu::Image) -> (f64, f64) {
    match &image.image {
        vello_cpu::ImageSource::Pixmap(p) => (f64::from(p.width()), f64::from(p.height())),
        vello_cpu::ImageSource::OpaqueId(_) => (0.0, 0.0),
    }
}

pub(crate) fn premul_bytes_to_image(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PostkitResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(rgba8_premul, width, height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PostkitResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PostkitError::validation("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PostkitError::validation("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PostkitError::validation("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

#[cfg(test)]
#[path = "../../tests/unit/surface/raster.rs"]
mod tests;
