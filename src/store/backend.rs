use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{PostkitError, PostkitResult};
use crate::scene::template::Template;

/// Persistent template list kept under a single key as one JSON array.
///
/// Implementors provide raw access to that key; listing, upsert, delete and append are shared.
/// Legacy documents are migrated on read by [`Template`]'s wire format.
pub trait TemplateStore {
    /// Stored JSON, or `None` if nothing was ever saved.
    fn read_raw(&self) -> PostkitResult<Option<String>>;
    /// Replace the stored JSON.
    fn write_raw(&mut self, json: &str) -> PostkitResult<()>;

    fn list(&self) -> PostkitResult<Vec<Template>> {
        match self.read_raw()? {
            None => Ok(Vec::new()),
            Some(raw) if raw.trim().is_empty() => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| PostkitError::template(format!("stored templates are corrupt: {e}"))),
        }
    }

    /// Insert, or replace the entry with the same id in place.
    fn save(&mut self, template: Template) -> PostkitResult<()> {
        let mut all = self.list()?;
        match all.iter_mut().find(|t| t.id == template.id) {
            Some(slot) => *slot = template,
            None => all.push(template),
        }
        self.write_all(&all)
    }

    /// Remove the entry with `id`. Unknown ids are ignored.
    fn delete(&mut self, id: &str) -> PostkitResult<()> {
        let mut all = self.list()?;
        let before = all.len();
        all.retain(|t| t.id != id);
        if all.len() == before {
            tracing::debug!(id, "delete of unknown template ignored");
            return Ok(());
        }
        self.write_all(&all)
    }

    /// Add entries after the existing ones without touching them.
    fn append(&mut self, templates: &[Template]) -> PostkitResult<()> {
        let mut all = self.list()?;
        all.extend_from_slice(templates);
        self.write_all(&all)
    }

    fn write_all(&mut self, all: &[Template]) -> PostkitResult<()> {
        let json = serde_json::to_string(all)?;
        self.write_raw(&json)
    }
}

/// Store held in memory, for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct InMemoryTemplateStore {
    raw: Option<String>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with raw JSON, as if written by an earlier session.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn read_raw(&self) -> PostkitResult<Option<String>> {
        Ok(self.raw.clone())
    }

    fn write_raw(&mut self, json: &str) -> PostkitResult<()> {
        self.raw = Some(json.to_owned());
        Ok(())
    }
}

/// Store backed by one JSON file. A missing file is an empty store.
#[derive(Clone, Debug)]
pub struct FileTemplateStore {
    path: PathBuf,
}

impl FileTemplateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateStore for FileTemplateStore {
    fn read_raw(&self) -> PostkitResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(anyhow::Error::new(e)
                .context(format!("read template store '{}'", self.path.display()))
                .into()),
        }
    }

    fn write_raw(&mut self, json: &str) -> PostkitResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, json)
            .with_context(|| format!("write template store '{}'", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/store/backend.rs"]
mod tests;
