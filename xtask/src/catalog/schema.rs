use super::{CorpusFile, Problem};
use crate::runtime::error::{XtaskError, XtaskResult};
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Compiled structural schema for one project record.
pub struct ProjectSchema {
    compiled: JSONSchema,
}

impl std::fmt::Debug for ProjectSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectSchema").finish_non_exhaustive()
    }
}

impl ProjectSchema {
    /// Read and compile the schema document at `path`.
    pub fn load(path: &Path) -> XtaskResult<Self> {
        let text = fs::read_to_string(path).map_err(|err| {
            XtaskError::config(format!("failed to read schema {}: {err}", path.display()))
                .with_path(path)
        })?;
        Self::from_json_str(&text).map_err(|err| err.with_path(path))
    }

    /// Compile a schema from its JSON text.
    pub fn from_json_str(text: &str) -> XtaskResult<Self> {
        let schema: Value = serde_json::from_str(text)
            .map_err(|err| XtaskError::config(format!("schema is not valid JSON: {err}")))?;
        Self::from_value(&schema)
    }

    /// Compile an already-parsed schema document, enforcing `format` keywords.
    pub fn from_value(schema: &Value) -> XtaskResult<Self> {
        let compiled = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .should_validate_formats(true)
            .compile(schema)
            .map_err(|err| XtaskError::config(format!("failed to compile schema: {err}")))?;
        Ok(Self { compiled })
    }

    /// Structural findings for one record, one per schema violation.
    pub fn check(&self, file: &CorpusFile) -> Vec<Problem> {
        match self.compiled.validate(&file.document) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|error| {
                    let pointer = error.instance_path.to_string();
                    let location = if pointer.is_empty() { "/" } else { pointer.as_str() };
                    Problem::new("schema", &file.rel_path, format!("{location} {error}"))
                })
                .collect(),
        }
    }
}
