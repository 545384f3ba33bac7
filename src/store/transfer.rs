use crate::foundation::error::{PostkitError, PostkitResult};
use crate::scene::template::Template;
use crate::store::backend::TemplateStore;

/// File name of a whole-store export.
pub const EXPORT_ALL_FILE_NAME: &str = "postkit-templates.json";

/// A file ready to be handed to the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportFile {
    pub name: String,
    pub mime: &'static str,
    pub contents: String,
}

/// Keep ASCII letters, digits, `-`, `_` and spaces.
pub fn sanitize_file_stem(name: &str) -> String {
    let s: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ' '))
        .collect();
    if s.trim().is_empty() {
        "template".to_owned()
    } else {
        s
    }
}

pub fn export_one(template: &Template) -> PostkitResult<ExportFile> {
    Ok(ExportFile {
        name: format!("{}.cbtemplate.json", sanitize_file_stem(&template.name)),
        mime: "application/json",
        contents: template.to_json_pretty()?,
    })
}

/// Every stored template as one array. `None` when the store is empty.
pub fn export_all(store: &dyn TemplateStore) -> PostkitResult<Option<ExportFile>> {
    let all = store.list()?;
    if all.is_empty() {
        return Ok(None);
    }
    Ok(Some(ExportFile {
        name: EXPORT_ALL_FILE_NAME.to_owned(),
        mime: "application/json",
        contents: serde_json::to_string_pretty(&all)?,
    }))
}

/// Import a template file holding one template or an array of them.
///
/// Entries that fail validation are dropped. Survivors get fresh ids and are appended to the
/// store; existing entries are never overwritten. If nothing survives the store is untouched.
#[tracing::instrument(skip(store, bytes), fields(len = bytes.len()))]
pub fn import_templates(
    store: &mut dyn TemplateStore,
    bytes: &[u8],
) -> PostkitResult<Vec<Template>> {
    let parsed: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|e| PostkitError::template(format!("invalid template file: {e}")))?;
    let candidates = match parsed {
        serde_json::Value::Array(items) => items,
        other => vec![other],
    };

    let imported: Vec<Template> = candidates
        .into_iter()
        .enumerate()
        .filter_map(|(i, v)| match candidate(v) {
            Ok(t) => Some(t),
            Err(e) => {
                tracing::warn!(index = i, error = %e, "template dropped on import");
                None
            }
        })
        .map(|t| Template {
            id: uuid::Uuid::new_v4().to_string(),
            ..t
        })
        .collect();

    if imported.is_empty() {
        return Err(PostkitError::template("no valid templates found"));
    }
    store.append(&imported)?;
    tracing::info!(count = imported.len(), "templates imported");
    Ok(imported)
}

fn candidate(v: serde_json::Value) -> PostkitResult<Template> {
    if !v.is_object() {
        return Err(PostkitError::template("entry is not an object"));
    }
    let t: Template = serde_json::from_value(v)?;
    t.validate()?;
    Ok(t)
}

#[cfg(test)]
#[path = "../../tests/unit/store/transfer.rs"]
mod tests;
