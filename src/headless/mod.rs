//! Headless batch rendering: one scene over many background images.

/// Batch renderer.
pub mod batch;
/// Output sinks.
pub mod sink;

pub use batch::{BatchReport, HeadlessRenderer};
pub use sink::{BatchConfig, BatchSink, DirBatchSink, InMemoryBatchSink};
