use crate::assets::decode::Bitmap;
use crate::codec::gradient::FillDescriptor;
use crate::foundation::core::{Affine, Point, Rect, Vec2};
use crate::scene::model::{FontStyle, OverlayKind, TextAlign};

/// Identity of one live object on a [`Surface`](crate::surface::Surface).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) u64);

/// Discriminant of a live object, used for z-order enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Image,
    Overlay(OverlayKind),
    Text,
    Logo,
}

macro_rules! handle {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub(crate) ObjectId);

        impl $name {
            pub fn id(self) -> ObjectId {
                self.0
            }
        }
    };
}

handle!(
    /// Typed reference to the background image object.
    ImageLayerHandle
);
handle!(
    /// Typed reference to one text object.
    TextLayerHandle
);
handle!(
    /// Typed reference to a fade or vignette overlay.
    OverlayHandle
);
handle!(
    /// Typed reference to the logo object.
    LogoHandle
);

/// Background photo, placed by its center.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageObject {
    pub bitmap: Bitmap,
    pub center: Point,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Centered clip size in image-local pixels.
    pub clip: Option<Vec2>,
    pub opacity: f64,
}

impl ImageObject {
    /// Visible source rectangle in image-local pixels.
    pub fn source_rect(&self) -> Rect {
        let (bw, bh) = (f64::from(self.bitmap.width), f64::from(self.bitmap.height));
        let full = Rect::new(0.0, 0.0, bw, bh);
        match self.clip {
            Some(c) => Rect::from_center_size(full.center(), (c.x, c.y)).intersect(full),
            None => full,
        }
    }

    /// Image-local to canvas transform.
    pub fn transform(&self) -> Affine {
        let (bw, bh) = (f64::from(self.bitmap.width), f64::from(self.bitmap.height));
        Affine::translate(self.center.to_vec2())
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
            * Affine::translate((-bw / 2.0, -bh / 2.0))
    }
}

/// Full-canvas rectangle filled with a fade or vignette gradient. Never selectable.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayObject {
    pub kind: OverlayKind,
    pub width: f64,
    pub height: f64,
    pub fill: FillDescriptor,
}

/// Brand logo, anchored at its top-left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoObject {
    pub bitmap: Bitmap,
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub opacity: f64,
}

impl LogoObject {
    pub fn transform(&self) -> Affine {
        Affine::translate((self.left, self.top))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

/// Fill of a live text object: a flat color or a gradient in object-local pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum TextFill {
    Solid(String),
    Gradient(FillDescriptor),
}

/// Live text object.
///
/// Font size, stroke width and wrap width are *live* values: they are multiplied by the
/// object's scale when painted, and an interactive resize changes the scale rather than these
/// values. They are only reachable through the style codec, which converts them to and from
/// logical values.
#[derive(Clone, Debug, PartialEq)]
pub struct TextObject {
    /// Display text, with any text transform already applied.
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub font_family: String,
    pub font_weight: String,
    pub font_style: FontStyle,
    pub fill: TextFill,
    pub background_color: String,
    pub text_align: TextAlign,
    pub opacity: f64,
    pub line_height: f64,
    /// Tracking in 1/1000 em.
    pub char_spacing: f64,
    pub stroke_color: String,
    pub shadow: bool,
    font_size: f64,
    stroke_width: f64,
    width: f64,
    scale_x: f64,
    scale_y: f64,
    dims: Option<Vec2>,
}

impl TextObject {
    pub(crate) fn new(text: String, font_size: f64, stroke_width: f64, width: f64) -> Self {
        let mut obj = Self {
            text,
            left: 0.0,
            top: 0.0,
            font_family: String::new(),
            font_weight: "normal".to_owned(),
            font_style: FontStyle::Normal,
            fill: TextFill::Solid("#000000".to_owned()),
            background_color: String::new(),
            text_align: TextAlign::Left,
            opacity: 1.0,
            line_height: 1.0,
            char_spacing: 0.0,
            stroke_color: String::new(),
            shadow: false,
            font_size,
            stroke_width,
            width,
            scale_x: 1.0,
            scale_y: 1.0,
            dims: None,
        };
        obj.init_dimensions();
        obj
    }

    pub(crate) fn live_font_size(&self) -> f64 {
        self.font_size
    }

    pub(crate) fn live_stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub(crate) fn live_width(&self) -> f64 {
        self.width
    }

    pub(crate) fn set_live_font_size(&mut self, v: f64) {
        self.font_size = v;
        self.dims = None;
    }

    pub(crate) fn set_live_stroke_width(&mut self, v: f64) {
        self.stroke_width = v;
        self.dims = None;
    }

    pub(crate) fn set_live_width(&mut self, v: f64) {
        self.width = v;
        self.dims = None;
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    pub(crate) fn set_scale(&mut self, sx: f64, sy: f64) {
        self.scale_x = sx;
        self.scale_y = sy;
    }

    /// Whether the cached layout box is stale.
    pub fn is_dirty(&self) -> bool {
        self.dims.is_none()
    }

    /// Recompute the unscaled layout box from a glyph-width estimate.
    ///
    /// Only for when no face can shape the text; see
    /// [`SurfaceRenderer::measure_text`](crate::surface::raster::SurfaceRenderer::measure_text).
    pub fn init_dimensions(&mut self) {
        self.dims = Some(self.measure());
    }

    /// Store a layout box measured from the shaped text.
    pub(crate) fn set_dimensions(&mut self, dims: Vec2) {
        self.dims = Some(dims);
    }

    /// Unscaled layout box (`width x lines * font_size * line_height`).
    pub fn dimensions(&self) -> Vec2 {
        self.dims.unwrap_or_else(|| self.measure())
    }

    /// Height of one line box in unscaled pixels.
    pub fn line_box(&self) -> f64 {
        self.font_size * self.line_height
    }

    fn measure(&self) -> Vec2 {
        let lines = estimate_line_count(&self.text, self.font_size, self.char_spacing, self.width);
        Vec2::new(self.width, lines as f64 * self.line_box())
    }

    pub fn transform(&self) -> Affine {
        Affine::translate((self.left, self.top))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

/// Greedy word wrap with an average glyph advance of half an em.
fn estimate_line_count(text: &str, font_size: f64, char_spacing: f64, width: f64) -> usize {
    let advance = (font_size * (0.5 + char_spacing / 1000.0)).max(0.01);
    let per_line = ((width / advance).floor() as usize).max(1);
    text.split('\n')
        .map(|para| {
            let mut lines = 1usize;
            let mut used = 0usize;
            for word in para.split_whitespace() {
                let len = word.chars().count();
                let need = if used == 0 { len } else { used + 1 + len };
                if need <= per_line || used == 0 {
                    used = need;
                } else {
                    lines += 1;
                    used = len;
                }
                while used > per_line {
                    lines += 1;
                    used -= per_line;
                }
            }
            lines
        })
        .sum::<usize>()
        .max(1)
}

/// One live object of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceObject {
    Image(ImageObject),
    Overlay(OverlayObject),
    Text(TextObject),
    Logo(LogoObject),
}

impl SurfaceObject {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Self::Image(_) => ObjectKind::Image,
            Self::Overlay(o) => ObjectKind::Overlay(o.kind),
            Self::Text(_) => ObjectKind::Text,
            Self::Logo(_) => ObjectKind::Logo,
        }
    }

    /// Overlays cannot be picked or dragged.
    pub fn selectable(&self) -> bool {
        !matches!(self, Self::Overlay(_))
    }

    /// Axis-aligned bounds in canvas pixels.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Image(i) => i.transform().transform_rect_bbox(i.source_rect()),
            Self::Overlay(o) => Rect::new(0.0, 0.0, o.width, o.height),
            Self::Text(t) => {
                let d = t.dimensions();
                t.transform()
                    .transform_rect_bbox(Rect::new(0.0, 0.0, d.x, d.y))
            }
            Self::Logo(l) => l.transform().transform_rect_bbox(Rect::new(
                0.0,
                0.0,
                f64::from(l.bitmap.width),
                f64::from(l.bitmap.height),
            )),
        }
    }

    pub fn translate(&mut self, d: Vec2) {
        match self {
            Self::Image(i) => i.center += d,
            Self::Overlay(_) => {}
            Self::Text(t) => {
                t.left += d.x;
                t.top += d.y;
            }
            Self::Logo(l) => {
                l.left += d.x;
                l.top += d.y;
            }
        }
    }

    /// Multiply the object's scale factors, as a resize handle does.
    pub fn scale_by(&mut self, fx: f64, fy: f64) {
        match self {
            Self::Image(i) => {
                i.scale_x *= fx;
                i.scale_y *= fy;
            }
            Self::Overlay(_) => {}
            Self::Text(t) => {
                let (sx, sy) = t.scale();
                t.set_scale(sx * fx, sy * fy);
            }
            Self::Logo(l) => {
                l.scale_x *= fx;
                l.scale_y *= fy;
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/surface/objects.rs"]
mod tests;
