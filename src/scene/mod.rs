/// Logical scene data model.
pub mod model;
/// Persisted template format.
pub mod template;
