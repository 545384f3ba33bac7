//! Pure conversions between logical configs and live surface objects.

/// Gradient fill descriptors for every overlay type.
pub mod gradient;
/// Cover-fit placement and layer object builders.
pub mod placement;
/// Text style round-trip under interactive scale.
pub mod style;
