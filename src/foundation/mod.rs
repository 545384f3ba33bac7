/// Core geometry and canvas types.
pub mod core;
/// Error taxonomy.
pub mod error;
pub(crate) mod math;
