//! Template persistence contract and file import/export.

/// Store trait and backends.
pub mod backend;
/// Import and export of template files.
pub mod transfer;

pub use backend::{FileTemplateStore, InMemoryTemplateStore, TemplateStore};
pub use transfer::{ExportFile, export_all, export_one, import_templates};
