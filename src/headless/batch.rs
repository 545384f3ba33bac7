use crate::assets::decode::{Bitmap, decode_image};
use crate::assets::fonts::FontBook;
use crate::foundation::error::PostkitResult;
use crate::headless::sink::{BatchConfig, BatchSink};
use crate::scene::model::SceneDescription;
use crate::surface::Surface;
use crate::surface::encode::{RasterFormat, encode_frame};
use crate::surface::raster::{RenderSettings, SurfaceRenderer};
use crate::surface::stack::populate;

/// Batch statistics.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Images pushed to the sink.
    pub rendered: usize,
    /// Inputs that could not be decoded: 0-based input index and reason.
    pub failed: Vec<(usize, String)>,
}

/// Output file name for the input at 0-based `index`.
pub fn output_name(index: usize, format: RasterFormat) -> String {
    format!("post-{}.{}", index + 1, format.extension())
}

/// Renders one scene over many background images, with no interactive state.
///
/// Each input gets a fresh scratch surface populated through the same stacking and placement
/// code the interactive engine uses, so a batch output matches what the editor showed.
pub struct HeadlessRenderer {
    renderer: SurfaceRenderer,
    logo: Option<Bitmap>,
}

impl HeadlessRenderer {
    pub fn new(fonts: FontBook, settings: RenderSettings, logo: Option<Bitmap>) -> Self {
        Self {
            renderer: SurfaceRenderer::new(fonts, settings),
            logo,
        }
    }

    /// Render `scene` once per input, in input order.
    ///
    /// An input that fails to decode is recorded in the report and skipped. Render and sink
    /// errors abort the batch.
    #[tracing::instrument(skip(self, scene, inputs, sink), fields(n = inputs.len()))]
    pub fn render_batch<B: AsRef<[u8]>>(
        &mut self,
        scene: &SceneDescription,
        inputs: &[B],
        format: RasterFormat,
        sink: &mut dyn BatchSink,
    ) -> PostkitResult<BatchReport> {
        scene.validate()?;
        sink.begin(BatchConfig {
            width: scene.canvas.width,
            height: scene.canvas.height,
            format,
            items: inputs.len(),
        })?;

        let mut report = BatchReport::default();
        for (i, input) in inputs.iter().enumerate() {
            let bitmap = match decode_image(input.as_ref()) {
                Ok(b) => b,
                Err(e) => {
                    tracing::warn!(index = i, error = %e, "batch input skipped");
                    report.failed.push((i, e.to_string()));
                    continue;
                }
            };
            let bytes = self.render_one(scene, &bitmap, i as u64 + 1, format)?;
            sink.push_image(&output_name(i, format), &bytes)?;
            report.rendered += 1;
        }

        sink.end()?;
        tracing::info!(
            rendered = report.rendered,
            failed = report.failed.len(),
            "batch finished"
        );
        Ok(report)
    }

    fn render_one(
        &mut self,
        scene: &SceneDescription,
        image: &Bitmap,
        generation: u64,
        format: RasterFormat,
    ) -> PostkitResult<Vec<u8>> {
        let mut surface = Surface::new(scene.canvas, generation, &scene.bg_color);
        populate(&mut surface, scene, Some(image), self.logo.as_ref());
        let frame = self.renderer.render(&surface, false)?;
        encode_frame(&frame, format)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/headless/batch.rs"]
mod tests;
