use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{PostkitError, PostkitResult};

/// Identity of one registered font face.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceKey {
    /// Lowercased family name.
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl FaceKey {
    pub fn new(family: &str, bold: bool, italic: bool) -> Self {
        Self {
            family: family.trim().to_ascii_lowercase(),
            bold,
            italic,
        }
    }
}

/// Caller-registered font faces keyed by family, weight and style.
///
/// Font discovery is not this crate's job: the application registers the bytes of every face it
/// offers. Resolution falls back to the family's regular face, then to the first registered
/// face, so a document always renders with *some* face when any is available.
#[derive(Clone, Debug, Default)]
pub struct FontBook {
    faces: BTreeMap<FaceKey, Arc<Vec<u8>>>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a face.
    pub fn register(&mut self, family: &str, bold: bool, italic: bool, bytes: Vec<u8>) {
        self.faces
            .insert(FaceKey::new(family, bold, italic), Arc::new(bytes));
    }

    /// Read a font file from disk and register it.
    pub fn register_file(
        &mut self,
        family: &str,
        bold: bool,
        italic: bool,
        path: &Path,
    ) -> PostkitResult<()> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        if bytes.is_empty() {
            return Err(PostkitError::validation(format!(
                "font file '{}' is empty",
                path.display()
            )));
        }
        self.register(family, bold, italic, bytes);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Resolve the best registered face for a requested family/weight/style.
    pub fn resolve(&self, family: &str, bold: bool, italic: bool) -> Option<(FaceKey, Arc<Vec<u8>>)> {
        let exact = FaceKey::new(family, bold, italic);
        let regular = FaceKey::new(family, false, false);
        [exact, regular]
            .into_iter()
            .find_map(|k| self.faces.get(&k).map(|b| (k, b.clone())))
            .or_else(|| {
                self.faces
                    .iter()
                    .next()
                    .map(|(k, b)| (k.clone(), b.clone()))
            })
    }
}

/// Whether a CSS-like weight string selects a bold face.
pub fn is_bold_weight(weight: &str) -> bool {
    match weight.trim() {
        "bold" | "bolder" => true,
        other => other.parse::<u32>().map(|w| w >= 600).unwrap_or(false),
    }
}

/// One shaped block of text ready for glyph painting.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<()>,
    pub(crate) font: vello_cpu::peniko::FontData,
}

/// Parley contexts plus the per-face registration cache.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    registered: HashMap<FaceKey, (String, vello_cpu::peniko::FontData)>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            registered: HashMap::new(),
        }
    }

    fn family_for(
        &mut self,
        key: &FaceKey,
        bytes: &[u8],
    ) -> PostkitResult<(String, vello_cpu::peniko::FontData)> {
        if let Some(hit) = self.registered.get(key) {
            return Ok(hit.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            PostkitError::validation("no font families registered from font bytes")
        })?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| PostkitError::validation("registered font family has no name"))?
            .to_string();
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.to_vec()),
            0,
        );
        self.registered
            .insert(key.clone(), (family_name.clone(), font.clone()));
        Ok((family_name, font))
    }

    /// Shape `text` wrapped at `max_width_px`. Returns `None` when no face is registered.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn layout(
        &mut self,
        book: &FontBook,
        family: &str,
        bold: bool,
        italic: bool,
        text: &str,
        size_px: f32,
        letter_spacing_px: f32,
        max_width_px: f32,
    ) -> PostkitResult<Option<ShapedText>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PostkitError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let Some((key, bytes)) = book.resolve(family, bold, italic) else {
            return Ok(None);
        };
        let (family_name, font) = self.family_for(&key, &bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            letter_spacing_px,
        ));

        let mut layout: parley::Layout<()> = builder.build(text);
        let w = max_width_px.max(1.0);
        layout.break_all_lines(Some(w));
        layout.align(
            Some(w),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        Ok(Some(ShapedText { layout, font }))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/fonts.rs"]
mod tests;
