use crate::assets::decode::{Bitmap, decode_image, decode_logo};
use crate::assets::fonts::FontBook;
use crate::codec::placement::{
    fade_overlay, logo_object, place_image, read_logo, refit_image, vignette_overlay,
};
use crate::codec::style::{TextStyleUpdate, apply_update, from_live_style, live_gradient_fill, to_live_style};
use crate::engine::history::History;
use crate::engine::loads::{LoadKind, LoadOutcome, LoadTicket, LoadTracker};
use crate::foundation::core::{CanvasSize, Point, Vec2};
use crate::foundation::error::PostkitResult;
use crate::headless::batch::{BatchReport, HeadlessRenderer};
use crate::headless::sink::BatchSink;
use crate::scene::model::{
    BgGradientConfig, FadeConfig, LogoConfig, SceneDescription, TextGradient,
    TextLayerConfig, VignetteConfig,
};
use crate::scene::template::Template;
use crate::surface::encode::{RasterFormat, encode_frame};
use crate::surface::objects::{ObjectId, TextFill, TextLayerHandle};
use crate::surface::raster::{FrameRGBA, RenderSettings, SurfaceRenderer};
use crate::surface::stack::{LayerHandles, apply_background, populate, populate_layers};
use crate::surface::{Surface, SurfaceEvent};

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct ComposerOpts {
    /// Maximum number of undo steps kept.
    pub history_limit: usize,
    /// Offset of a duplicated text layer from its source, both axes.
    pub duplicate_offset: f64,
    /// `y` of the first added text layer.
    pub text_stack_offset: f64,
    /// Vertical step between added text layers.
    pub text_stack_step: f64,
    pub render: RenderSettings,
}

impl Default for ComposerOpts {
    fn default() -> Self {
        Self {
            history_limit: 50,
            duplicate_offset: 20.0,
            text_stack_offset: 50.0,
            text_stack_step: 80.0,
            render: RenderSettings::default(),
        }
    }
}

/// Role of one live object in the layer stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Image,
    Fade,
    Vignette,
    /// Text layer at this list index.
    Text(usize),
    Logo,
}

/// Composition engine for one open document.
///
/// Owns the live surface and a cached logical scene. The cache is the base for read-back:
/// live objects are the truth for geometry and style, the cache holds what they cannot
/// report (raw content, text transform, hidden solid fill, disabled logo geometry). Read-back
/// happens on demand and right before every destructive rebuild.
pub struct Composer {
    opts: ComposerOpts,
    surface: Surface,
    renderer: SurfaceRenderer,
    generation: u64,
    scene: SceneDescription,
    handles: LayerHandles,
    image: Option<Bitmap>,
    logo_art: Option<Bitmap>,
    selected: usize,
    history: History,
    loads: LoadTracker,
}

impl Composer {
    /// Engine showing the default scene on the default canvas.
    pub fn new(opts: ComposerOpts, fonts: FontBook) -> Self {
        let scene = SceneDescription::default();
        let renderer = SurfaceRenderer::new(fonts, opts.render.clone());
        let history = History::new(opts.history_limit);
        let mut surface = Surface::new(scene.canvas, 1, &scene.bg_color);
        let handles = populate(&mut surface, &scene, None, None);
        let mut composer = Self {
            opts,
            surface,
            renderer,
            generation: 1,
            scene,
            handles,
            image: None,
            logo_art: None,
            selected: 0,
            history,
            loads: LoadTracker::default(),
        };
        composer.relayout_texts();
        composer
    }

    /// Discard the live surface and rebuild it from `scene` at `canvas`.
    ///
    /// The background bitmap and logo artwork survive and are placed anew.
    #[tracing::instrument(skip(self, scene), fields(w = canvas.width, h = canvas.height))]
    pub fn initialize(&mut self, canvas: CanvasSize, scene: SceneDescription) -> PostkitResult<()> {
        let scene = SceneDescription { canvas, ..scene };
        scene.validate()?;
        self.reinitialize(scene);
        Ok(())
    }

    fn reinitialize(&mut self, scene: SceneDescription) {
        self.generation += 1;
        let mut surface = Surface::new(scene.canvas, self.generation, &scene.bg_color);
        self.handles = populate(
            &mut surface,
            &scene,
            self.image.as_ref(),
            self.logo_art.as_ref(),
        );
        self.surface = surface;
        self.selected = self.selected.min(scene.text_layers.len().saturating_sub(1));
        self.scene = scene;
        self.relayout_texts();
        tracing::debug!(generation = self.generation, "surface rebuilt");
    }

    /// Same-size rebuild: everything but the background image object is recreated.
    fn rebuild_in_place(&mut self, scene: SceneDescription) {
        let keep = self.handles.image.map(|h| h.id());
        let doomed: Vec<ObjectId> = self
            .surface
            .iter()
            .map(|(id, _)| id)
            .filter(|id| Some(*id) != keep)
            .collect();
        for id in doomed {
            self.surface.remove(id);
        }
        if let Some(h) = self.handles.image {
            if scene.image_padding != self.scene.image_padding {
                if let Some(img) = self.surface.image_mut(h) {
                    refit_image(img, scene.canvas, scene.image_padding);
                }
            }
        }
        populate_layers(
            &mut self.surface,
            &mut self.handles,
            &scene,
            self.logo_art.as_ref(),
        );
        self.selected = self.selected.min(scene.text_layers.len().saturating_sub(1));
        self.scene = scene;
        self.relayout_texts();
    }

    fn relayout_texts(&mut self) {
        for h in self.handles.texts.clone() {
            self.relayout_text(h);
        }
    }

    /// Refresh a text object's layout box with the faces that paint it.
    fn relayout_text(&mut self, h: TextLayerHandle) {
        let Some(obj) = self.surface.text_mut(h) else {
            return;
        };
        match self.renderer.measure_text(obj) {
            Ok(Some(dims)) => obj.set_dimensions(dims),
            Ok(None) => obj.init_dimensions(),
            Err(e) => {
                tracing::warn!(error = %e, "text layout failed, using estimate");
                obj.init_dimensions();
            }
        }
    }

    /// Replace the scene, rebuilding fully only when the canvas size differs.
    fn restore(&mut self, scene: SceneDescription) {
        if scene.canvas == self.surface.size() {
            self.rebuild_in_place(scene);
        } else {
            self.reinitialize(scene);
        }
    }

    fn record(&mut self) {
        let before = self.read_back();
        self.history.record(before);
    }

    // ---------------------------------------------------------------------------------------
    // Read-back
    // ---------------------------------------------------------------------------------------

    /// Up-to-date logical scene reconstructed from the live objects.
    pub fn scene(&self) -> SceneDescription {
        self.read_back()
    }

    fn read_back(&self) -> SceneDescription {
        let mut scene = self.scene.clone();
        scene.text_layers = self
            .handles
            .texts
            .iter()
            .zip(&self.scene.text_layers)
            .map(|(h, cfg)| match self.surface.text(*h) {
                Some(obj) => from_live_style(obj, cfg, cfg.fill_gradient.as_ref()),
                None => cfg.clone(),
            })
            .collect();
        scene.logo = self.live_logo().unwrap_or(self.scene.logo);
        scene
    }

    fn live_logo(&self) -> Option<LogoConfig> {
        let obj = self.surface.logo(self.handles.logo?)?;
        Some(read_logo(obj, self.scene.logo.enabled))
    }

    pub fn text_configs(&self) -> Vec<TextLayerConfig> {
        self.read_back().text_layers
    }

    /// Read-back config of the selected text layer.
    pub fn selected_text(&self) -> Option<TextLayerConfig> {
        let h = self.handles.texts.get(self.selected)?;
        let cfg = self.scene.text_layers.get(self.selected)?;
        let obj = self.surface.text(*h)?;
        Some(from_live_style(obj, cfg, cfg.fill_gradient.as_ref()))
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn logo_config(&self) -> LogoConfig {
        self.live_logo().unwrap_or(self.scene.logo)
    }

    pub fn canvas(&self) -> CanvasSize {
        self.surface.size()
    }

    /// Generation of the current live surface; bumps on every full rebuild.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn has_background_image(&self) -> bool {
        self.handles.image.is_some()
    }

    /// Live objects bottom to top, by role.
    pub fn layer_stack(&self) -> Vec<LayerKind> {
        self.surface
            .iter()
            .filter_map(|(id, _)| self.layer_kind(id))
            .collect()
    }

    fn layer_kind(&self, id: ObjectId) -> Option<LayerKind> {
        let h = &self.handles;
        if h.image.is_some_and(|x| x.id() == id) {
            return Some(LayerKind::Image);
        }
        if h.fade.is_some_and(|x| x.id() == id) {
            return Some(LayerKind::Fade);
        }
        if h.vignette.is_some_and(|x| x.id() == id) {
            return Some(LayerKind::Vignette);
        }
        if h.logo.is_some_and(|x| x.id() == id) {
            return Some(LayerKind::Logo);
        }
        h.texts
            .iter()
            .position(|x| x.id() == id)
            .map(LayerKind::Text)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ---------------------------------------------------------------------------------------
    // Background
    // ---------------------------------------------------------------------------------------

    /// Replace the background image, cover-fit with the current padding.
    pub fn set_background_image(&mut self, bitmap: Bitmap) {
        if let Some(old) = self.handles.image.take() {
            self.surface.remove(old.id());
        }
        let obj = place_image(bitmap.clone(), self.surface.size(), self.scene.image_padding);
        self.handles.image = Some(self.surface.insert_image(0, obj));
        self.handles.restack_overlays(&mut self.surface);
        self.image = Some(bitmap);
        self.sync_selection();
    }

    /// Decode and apply a background image. On failure nothing changes.
    pub fn set_background_image_bytes(&mut self, bytes: &[u8]) -> PostkitResult<()> {
        let bitmap = decode_image(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "background image rejected");
        })?;
        self.set_background_image(bitmap);
        Ok(())
    }

    /// Start an asynchronous background load against the current surface.
    pub fn begin_background_load(&mut self) -> LoadTicket {
        self.loads.begin(LoadKind::Background, self.generation)
    }

    /// Apply a finished background load unless it has been superseded.
    pub fn complete_background_load(&mut self, ticket: LoadTicket, bitmap: Bitmap) -> LoadOutcome {
        if ticket.kind() != LoadKind::Background || !self.loads.is_current(&ticket, self.generation)
        {
            tracing::debug!(?ticket, "stale background load discarded");
            return LoadOutcome::Stale;
        }
        self.set_background_image(bitmap);
        LoadOutcome::Applied
    }

    /// Remove the background image, leaving the plate and overlays.
    pub fn clear_background_image(&mut self) {
        if let Some(old) = self.handles.image.take() {
            self.surface.remove(old.id());
        }
        self.image = None;
        self.sync_selection();
    }

    /// Re-run cover fit on the existing image with a new padding.
    pub fn set_padding(&mut self, padding: f64) {
        self.record();
        self.scene.image_padding = padding;
        if let Some(h) = self.handles.image {
            let canvas = self.surface.size();
            if let Some(img) = self.surface.image_mut(h) {
                refit_image(img, canvas, padding);
            }
        }
    }

    pub fn set_bg_color(&mut self, color: &str) {
        self.record();
        self.scene.bg_color = color.to_owned();
        apply_background(&mut self.surface, &self.scene.bg_color, &self.scene.bg_gradient);
    }

    pub fn set_bg_gradient(&mut self, gradient: BgGradientConfig) {
        self.record();
        self.scene.bg_gradient = gradient;
        apply_background(&mut self.surface, &self.scene.bg_color, &self.scene.bg_gradient);
    }

    pub fn set_fade_config(&mut self, fade: FadeConfig) {
        self.record();
        if let Some(old) = self.handles.fade.take() {
            self.surface.remove(old.id());
        }
        if fade.enabled {
            let obj = fade_overlay(&fade, self.surface.size());
            self.handles.fade = Some(self.surface.insert_overlay(0, obj));
        }
        self.scene.fade = fade;
        self.handles.restack_overlays(&mut self.surface);
    }

    pub fn set_vignette_config(&mut self, vignette: VignetteConfig) {
        self.record();
        if let Some(old) = self.handles.vignette.take() {
            self.surface.remove(old.id());
        }
        if vignette.enabled {
            let obj = vignette_overlay(&vignette, self.surface.size());
            self.handles.vignette = Some(self.surface.insert_overlay(0, obj));
        }
        self.scene.vignette = vignette;
        self.handles.restack_overlays(&mut self.surface);
    }

    // ---------------------------------------------------------------------------------------
    // Text layers
    // ---------------------------------------------------------------------------------------

    /// Append a default text layer, stepped down so new layers don't overlap, and select it.
    pub fn add_text_layer(&mut self) -> usize {
        self.record();
        let count = self.handles.texts.len();
        let cfg = TextLayerConfig {
            y: self.opts.text_stack_offset + self.opts.text_stack_step * count as f64,
            ..TextLayerConfig::default()
        };
        self.push_text_layer(cfg)
    }

    fn push_text_layer(&mut self, cfg: TextLayerConfig) -> usize {
        let at = self.handles.text_insert_index(&self.surface);
        let h = self.surface.insert_text(at, to_live_style(&cfg));
        self.relayout_text(h);
        self.handles.texts.push(h);
        self.scene.text_layers.push(cfg);
        let idx = self.handles.texts.len() - 1;
        self.select_text_layer(idx);
        idx
    }

    /// Remove a text layer. No-op for the last remaining layer or a stale index.
    pub fn remove_text_layer(&mut self, index: usize) {
        if self.handles.texts.len() <= 1 || index >= self.handles.texts.len() {
            return;
        }
        self.record();
        let h = self.handles.texts.remove(index);
        self.scene.text_layers.remove(index);
        self.surface.remove(h.id());
        self.selected = index.saturating_sub(1);
        self.sync_selection();
    }

    /// Apply a logical style update to a text layer. Stale indices are ignored.
    pub fn update_text_style(&mut self, index: usize, update: TextStyleUpdate) {
        let (Some(h), Some(prev)) = (
            self.handles.texts.get(index).copied(),
            self.scene.text_layers.get(index).cloned(),
        ) else {
            return;
        };
        self.record();
        let Some(obj) = self.surface.text_mut(h) else {
            return;
        };
        apply_update(obj, &update, &prev);
        if let Some(g) = prev.active_gradient() {
            obj.fill = TextFill::Gradient(live_gradient_fill(obj, g));
        }
        self.relayout_text(h);

        let cached = &mut self.scene.text_layers[index];
        if let Some(c) = &update.content {
            cached.content = c.clone();
        }
        if let Some(t) = update.text_transform {
            cached.text_transform = t;
        }
        if let Some(f) = &update.fill {
            cached.fill = f.clone();
        }
    }

    /// Set or clear a text layer's fill gradient and refresh its live fill.
    pub fn set_text_gradient(&mut self, index: usize, gradient: Option<TextGradient>) {
        let Some(h) = self.handles.texts.get(index).copied() else {
            return;
        };
        self.record();
        let Some(obj) = self.surface.text_mut(h) else {
            return;
        };
        let cached = &mut self.scene.text_layers[index];
        if let TextFill::Solid(c) = &obj.fill {
            cached.fill = c.clone();
        }
        cached.fill_gradient = gradient;
        obj.fill = match cached.active_gradient() {
            Some(g) => TextFill::Gradient(live_gradient_fill(obj, g)),
            None => TextFill::Solid(cached.fill.clone()),
        };
    }

    /// Make a text layer the selection target.
    pub fn select_text_layer(&mut self, index: usize) {
        let Some(h) = self.handles.texts.get(index).copied() else {
            return;
        };
        self.selected = index;
        self.surface.set_active(Some(h.id()));
        self.sync_selection();
    }

    // ---------------------------------------------------------------------------------------
    // Logo
    // ---------------------------------------------------------------------------------------

    /// Show or hide the logo. Hiding remembers its last live geometry.
    pub fn toggle_logo(&mut self, enabled: bool) {
        self.record();
        if enabled {
            self.scene.logo.enabled = true;
            if self.handles.logo.is_none() {
                self.insert_logo();
            }
        } else {
            if let Some(live) = self.live_logo() {
                self.scene.logo = live;
            }
            self.scene.logo.enabled = false;
            if let Some(h) = self.handles.logo.take() {
                self.surface.remove(h.id());
            }
        }
        self.sync_selection();
    }

    fn insert_logo(&mut self) {
        if let Some(art) = &self.logo_art {
            let obj = logo_object(art.clone(), &self.scene.logo);
            self.handles.logo = Some(self.surface.insert_logo(self.surface.len(), obj));
        } else {
            tracing::debug!("logo enabled without artwork");
        }
    }

    pub fn set_logo_scale(&mut self, scale: f64) {
        let Some(h) = self.handles.logo else {
            return;
        };
        self.record();
        if let Some(l) = self.surface.logo_mut(h) {
            l.scale_x = scale;
            l.scale_y = scale;
        }
    }

    pub fn set_logo_opacity(&mut self, opacity: f64) {
        let Some(h) = self.handles.logo else {
            return;
        };
        self.record();
        if let Some(l) = self.surface.logo_mut(h) {
            l.opacity = opacity;
        }
    }

    /// Replace the logo artwork, keeping the logo's current geometry.
    pub fn set_logo_image(&mut self, bitmap: Bitmap) {
        if let Some(live) = self.live_logo() {
            self.scene.logo = live;
        }
        if let Some(h) = self.handles.logo.take() {
            self.surface.remove(h.id());
        }
        self.logo_art = Some(bitmap);
        if self.scene.logo.enabled {
            self.insert_logo();
        }
        self.sync_selection();
    }

    /// Decode (raster or SVG) and apply logo artwork. On failure nothing changes.
    pub fn set_logo_image_bytes(&mut self, bytes: &[u8]) -> PostkitResult<()> {
        let bitmap = decode_logo(bytes).inspect_err(|e| {
            tracing::warn!(error = %e, "logo image rejected");
        })?;
        self.set_logo_image(bitmap);
        Ok(())
    }

    pub fn begin_logo_load(&mut self) -> LoadTicket {
        self.loads.begin(LoadKind::Logo, self.generation)
    }

    pub fn complete_logo_load(&mut self, ticket: LoadTicket, bitmap: Bitmap) -> LoadOutcome {
        if ticket.kind() != LoadKind::Logo || !self.loads.is_current(&ticket, self.generation) {
            tracing::debug!(?ticket, "stale logo load discarded");
            return LoadOutcome::Stale;
        }
        self.set_logo_image(bitmap);
        LoadOutcome::Applied
    }

    // ---------------------------------------------------------------------------------------
    // Canvas and templates
    // ---------------------------------------------------------------------------------------

    /// Switch canvas size. Reads back the current scene first, then rebuilds everything.
    #[tracing::instrument(skip(self), fields(w = size.width, h = size.height))]
    pub fn change_canvas_size(&mut self, size: CanvasSize) {
        if size == self.surface.size() {
            return;
        }
        self.record();
        let scene = SceneDescription {
            canvas: size,
            ..self.read_back()
        };
        self.reinitialize(scene);
    }

    /// Replace the whole scene with a template's. The background image is kept.
    #[tracing::instrument(skip(self, template), fields(id = %template.id, name = %template.name))]
    pub fn apply_template(&mut self, template: &Template) -> PostkitResult<()> {
        let scene = template.scene()?;
        self.record();
        self.restore(scene);
        self.sync_selection();
        Ok(())
    }

    /// Snapshot the current scene as a new template with a fresh id.
    pub fn snapshot_template(&self, name: &str) -> Template {
        Template::from_scene(uuid::Uuid::new_v4().to_string(), name, &self.read_back())
    }

    // ---------------------------------------------------------------------------------------
    // Output
    // ---------------------------------------------------------------------------------------

    /// Encode the canvas at its native size. Clears the selection first.
    #[tracing::instrument(skip(self))]
    pub fn export_raster(&mut self, format: RasterFormat) -> PostkitResult<Vec<u8>> {
        self.deselect_all();
        let frame = self.renderer.render(&self.surface, false)?;
        let bytes = encode_frame(&frame, format)?;
        tracing::info!(bytes = bytes.len(), "raster exported");
        Ok(bytes)
    }

    /// Render with selection chrome, for on-screen previews.
    pub fn render_preview(&mut self) -> PostkitResult<FrameRGBA> {
        self.renderer.render(&self.surface, true)
    }

    /// Render the current scene once per input image without touching the live document.
    #[tracing::instrument(skip(self, inputs, sink), fields(n = inputs.len()))]
    pub fn batch_export(
        &self,
        inputs: &[Vec<u8>],
        format: RasterFormat,
        sink: &mut dyn BatchSink,
    ) -> PostkitResult<BatchReport> {
        let mut headless = HeadlessRenderer::new(
            self.renderer.fonts().clone(),
            self.opts.render.clone(),
            self.logo_art.clone(),
        );
        headless.render_batch(&self.read_back(), inputs, format, sink)
    }

    // ---------------------------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------------------------

    pub fn undo(&mut self) -> bool {
        let current = self.read_back();
        let Some(prev) = self.history.undo(current) else {
            return false;
        };
        self.restore(prev);
        self.sync_selection();
        true
    }

    pub fn redo(&mut self) -> bool {
        let current = self.read_back();
        let Some(next) = self.history.redo(current) else {
            return false;
        };
        self.restore(next);
        self.sync_selection();
        true
    }

    /// Copy the selected text layer on top of the stack, offset, and select the copy.
    pub fn duplicate_selected_text_layer(&mut self) -> Option<usize> {
        let mut cfg = self.selected_text()?;
        self.record();
        cfg.x += self.opts.duplicate_offset;
        cfg.y += self.opts.duplicate_offset;
        Some(self.push_text_layer(cfg))
    }

    /// Move the active object. No-op without a selection.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64) -> bool {
        let Some(id) = self.surface.active() else {
            return false;
        };
        self.record();
        let moved = self.surface.translate(id, Vec2::new(dx, dy));
        self.sync_selection();
        moved
    }

    pub fn deselect_all(&mut self) {
        self.surface.discard_active();
        self.sync_selection();
    }

    /// Remove whatever is selected: a text layer, the logo, or the background image.
    pub fn remove_selected_layer(&mut self) {
        match self.surface.active().and_then(|id| self.layer_kind(id)) {
            Some(LayerKind::Text(i)) => self.remove_text_layer(i),
            Some(LayerKind::Logo) => self.toggle_logo(false),
            Some(LayerKind::Image) => self.clear_background_image(),
            Some(LayerKind::Fade | LayerKind::Vignette) | None => {}
        }
    }

    /// Use pasted image bytes as the new background.
    pub fn paste_image(&mut self, bytes: &[u8]) -> PostkitResult<()> {
        self.set_background_image_bytes(bytes)
    }

    // ---------------------------------------------------------------------------------------
    // Pointer interaction
    // ---------------------------------------------------------------------------------------

    /// Select the topmost selectable object under `p` (or clear the selection).
    pub fn pointer_select(&mut self, p: Point) -> Option<LayerKind> {
        let hit = self.surface.hit_test(p);
        self.surface.set_active(hit);
        self.sync_selection();
        hit.and_then(|id| self.layer_kind(id))
    }

    /// Drag the active object. Only that live object changes.
    pub fn drag_active(&mut self, dx: f64, dy: f64) -> bool {
        let Some(id) = self.surface.active() else {
            return false;
        };
        self.record();
        let moved = self.surface.translate(id, Vec2::new(dx, dy));
        self.sync_selection();
        moved
    }

    /// Multiply the active object's scale, as a resize handle does.
    pub fn resize_active(&mut self, fx: f64, fy: f64) -> bool {
        let Some(id) = self.surface.active() else {
            return false;
        };
        self.record();
        let scaled = self.surface.scale(id, fx, fy);
        self.sync_selection();
        scaled
    }

    /// Fold pending surface events into engine state.
    fn sync_selection(&mut self) {
        for ev in self.surface.drain_events() {
            if let SurfaceEvent::SelectionChanged { id: Some(id) } = ev {
                if let Some(LayerKind::Text(i)) = self.layer_kind(id) {
                    self.selected = i;
                }
            }
        }
    }
}

impl std::fmt::Debug for Composer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Composer")
            .field("canvas", &self.surface.size())
            .field("generation", &self.generation)
            .field("layers", &self.layer_stack())
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/composer.rs"]
mod tests;
