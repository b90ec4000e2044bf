use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::checker::{self, ValidationError};
use crate::schema::{SchemaDocument, SchemaError};

/// File name suffix every corpus schema carries.
pub const SCHEMA_SUFFIX: &str = ".notecard.api.json";

/// Failure surfaced by registry-level validation: either the schema side
/// (unknown name, broken corpus) or a nonconforming instance.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A read-only registry of compiled schema documents.
///
/// Loads every `*.notecard.api.json` file in a directory once, at
/// construction time, and indexes it by file name. Loading is fail-fast:
/// a corrupt schema file aborts construction rather than half-loading
/// the corpus. After construction the registry is immutable, so sharing
/// it across threads needs no locking.
#[derive(Debug)]
pub struct SchemaRegistry {
    schema_dir: PathBuf,
    schemas: BTreeMap<String, SchemaDocument>,
}

impl SchemaRegistry {
    /// Load and compile every schema in `schema_dir` (non-recursive).
    ///
    /// # Errors
    ///
    /// `SchemaError::SchemaLoad` if a schema file cannot be read, parsed,
    /// or compiled.
    pub fn new(schema_dir: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let schema_dir = schema_dir.as_ref().to_path_buf();
        let mut schemas = BTreeMap::new();

        let entries = std::fs::read_dir(&schema_dir).map_err(|e| SchemaError::SchemaLoad {
            name: schema_dir.display().to_string(),
            reason: format!("cannot read schema directory: {e}"),
        })?;

        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !name.ends_with(SCHEMA_SUFFIX) {
                continue;
            }

            let content =
                std::fs::read_to_string(&path).map_err(|e| SchemaError::SchemaLoad {
                    name: name.to_string(),
                    reason: format!("cannot read file: {e}"),
                })?;
            let doc =
                SchemaDocument::parse(name, &content).map_err(|e| SchemaError::SchemaLoad {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            schemas.insert(name.to_string(), doc);
        }

        Ok(Self {
            schema_dir,
            schemas,
        })
    }

    /// The directory the registry was loaded from.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Number of loaded schemas.
    pub fn count(&self) -> usize {
        self.schemas.len()
    }

    /// File names of all loaded schemas, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Look up a compiled schema document by file name.
    pub fn get(&self, name: &str) -> Option<&SchemaDocument> {
        self.schemas.get(name)
    }

    /// Raw JSON of a schema by file name.
    pub fn raw(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name).map(SchemaDocument::raw)
    }

    /// Iterate over all loaded documents in name order.
    pub fn documents(&self) -> impl Iterator<Item = &SchemaDocument> {
        self.schemas.values()
    }

    /// Validate an instance against a named schema.
    ///
    /// # Errors
    ///
    /// `RegistryError::Schema` for an unknown schema name;
    /// `RegistryError::Validation` for a nonconforming instance.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), RegistryError> {
        let doc = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::SchemaNotFound(name.to_string()))?;
        checker::validate(instance, &doc.root)?;
        Ok(())
    }
}
