//! Postkit composes social-media graphics from a layered scene and renders them on the CPU.
//!
//! A scene is one background photo, a fade and a vignette overlay, any number of text layers and
//! a brand logo, stacked in that order. The public API is engine-oriented:
//!
//! - Describe a [`SceneDescription`] or load a [`Template`]
//! - Edit it live through a [`Composer`] (styles, drag/resize, undo/redo)
//! - Export one raster, or run a [`HeadlessRenderer`] batch into a [`BatchSink`]
//! - Persist templates through a [`TemplateStore`]
#![forbid(unsafe_code)]

/// Bitmap decoding, color parsing and font registration.
pub mod assets;
/// Conversions between logical configs and live objects.
pub mod codec;
/// Interactive composition engine.
pub mod engine;
/// Core types and errors.
pub mod foundation;
/// Batch rendering.
pub mod headless;
/// Scene data model and template wire format.
pub mod scene;
/// Template persistence.
pub mod store;
/// Live object graph and CPU rasterization.
pub mod surface;

pub use crate::assets::decode::{Bitmap, decode_image, decode_logo};
pub use crate::assets::fonts::FontBook;
pub use crate::codec::style::TextStyleUpdate;
pub use crate::engine::{Composer, ComposerOpts, LayerKind, LoadKind, LoadOutcome, LoadTicket};
pub use crate::foundation::core::{CanvasPreset, CanvasSize, Point, Rgba8Premul, Vec2};
pub use crate::foundation::error::{PostkitError, PostkitResult};
pub use crate::headless::{
    BatchConfig, BatchReport, BatchSink, DirBatchSink, HeadlessRenderer, InMemoryBatchSink,
};
pub use crate::scene::model::{
    BgGradientConfig, FadeConfig, FontStyle, GradientDirection, LogoConfig, SceneDescription,
    TextAlign, TextGradient, TextLayerConfig, TextTransform, VignetteConfig,
};
pub use crate::scene::template::Template;
pub use crate::store::{
    ExportFile, FileTemplateStore, InMemoryTemplateStore, TemplateStore, export_all, export_one,
    import_templates,
};
pub use crate::surface::encode::RasterFormat;
pub use crate::surface::raster::{FrameRGBA, RenderSettings};
