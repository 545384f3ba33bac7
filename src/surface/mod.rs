//! Render surface adapter: typed live objects in a strict z-order, rasterized on the CPU.

pub(crate) mod blur;
/// Raster serialization.
pub mod encode;
/// Ordered object graph and interaction events.
pub mod graph;
/// Typed live objects and handles.
pub mod objects;
/// CPU rasterization.
pub mod raster;
/// Shared stacking rules.
pub mod stack;

pub use graph::{Surface, SurfaceEvent};
