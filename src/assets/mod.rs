/// Hex color parsing.
pub mod color;
/// Bitmap decoding (raster and SVG logos).
pub mod decode;
/// Font registration and text shaping.
pub mod fonts;
