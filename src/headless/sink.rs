use std::path::PathBuf;

use anyhow::Context;

use crate::foundation::error::PostkitResult;
use crate::surface::encode::RasterFormat;

/// Configuration provided to a [`BatchSink`] at the start of a batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    pub format: RasterFormat,
    /// Number of inputs in the batch (some may fail).
    pub items: usize,
}

/// Sink contract for consuming encoded batch outputs.
///
/// Ordering contract: `push_image` is called in increasing input order. Failed inputs are
/// skipped, so names may have gaps.
pub trait BatchSink {
    /// Called once before any image is pushed.
    fn begin(&mut self, cfg: BatchConfig) -> PostkitResult<()>;
    /// Push one encoded image under its output file name.
    fn push_image(&mut self, name: &str, bytes: &[u8]) -> PostkitResult<()>;
    /// Called once after the last image is pushed.
    fn end(&mut self) -> PostkitResult<()>;
}

/// In-memory sink for tests and for callers that package the archive themselves.
#[derive(Debug, Default)]
pub struct InMemoryBatchSink {
    cfg: Option<BatchConfig>,
    pub(crate) images: Vec<(String, Vec<u8>)>,
    finished: bool,
}

impl InMemoryBatchSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&BatchConfig> {
        self.cfg.as_ref()
    }

    /// Encoded images with their names, in push order.
    pub fn images(&self) -> &[(String, Vec<u8>)] {
        &self.images
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl BatchSink for InMemoryBatchSink {
    fn begin(&mut self, cfg: BatchConfig) -> PostkitResult<()> {
        self.cfg = Some(cfg);
        self.images.clear();
        self.finished = false;
        Ok(())
    }

    fn push_image(&mut self, name: &str, bytes: &[u8]) -> PostkitResult<()> {
        self.images.push((name.to_owned(), bytes.to_vec()));
        Ok(())
    }

    fn end(&mut self) -> PostkitResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes every image as a file inside a directory, creating it on `begin`.
#[derive(Debug)]
pub struct DirBatchSink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirBatchSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl BatchSink for DirBatchSink {
    fn begin(&mut self, _cfg: BatchConfig) -> PostkitResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output directory '{}'", self.dir.display()))?;
        self.written.clear();
        Ok(())
    }

    fn push_image(&mut self, name: &str, bytes: &[u8]) -> PostkitResult<()> {
        let path = self.dir.join(name);
        std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> PostkitResult<()> {
        tracing::info!(dir = %self.dir.display(), files = self.written.len(), "batch written");
        Ok(())
    }
}
