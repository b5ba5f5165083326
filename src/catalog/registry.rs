//! Static metadata registry
//!
//! Holds type metadata registered at initialization time, either in code or
//! from a declarative YAML/JSON file. Read-only once built, so it can be
//! shared across threads freely.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::MetadataCatalog;
use crate::error::{AuditLensError, AuditLensResult};
use crate::models::{humanize, TypeMetadata};

/// Declarative catalog document
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    types: Vec<TypeMetadata>,
}

/// In-memory catalog keyed by type name
#[derive(Debug, Default, Clone)]
pub struct StaticCatalog {
    types: HashMap<String, TypeMetadata>,
}

impl StaticCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register metadata for a type, replacing any previous registration
    ///
    /// Rejects duplicate field names and more than one primary field. Empty
    /// titles are filled from the field name.
    pub fn register(&mut self, mut meta: TypeMetadata) -> AuditLensResult<()> {
        if meta.type_name.trim().is_empty() {
            return Err(AuditLensError::InvalidMetadata(
                "type name cannot be empty".into(),
            ));
        }

        let mut seen = HashSet::new();
        for field in &meta.fields {
            if !seen.insert(field.field_name.as_str()) {
                return Err(AuditLensError::InvalidMetadata(format!(
                    "duplicate field '{}' on {}",
                    field.field_name, meta.type_name
                )));
            }
        }

        let primaries = meta.fields.iter().filter(|f| f.is_primary).count();
        if primaries > 1 {
            return Err(AuditLensError::InvalidMetadata(format!(
                "{} declares {} primary fields",
                meta.type_name, primaries
            )));
        }

        for field in &mut meta.fields {
            if field.title.trim().is_empty() {
                field.title = humanize(&field.field_name);
            }
        }

        self.types.insert(meta.type_name.clone(), meta);
        Ok(())
    }

    /// Builder-style registration
    pub fn with_type(mut self, meta: TypeMetadata) -> AuditLensResult<Self> {
        self.register(meta)?;
        Ok(self)
    }

    /// Build a catalog from a YAML document
    pub fn from_yaml_str(yaml: &str) -> AuditLensResult<Self> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        Self::from_file(file)
    }

    /// Build a catalog from a JSON document
    pub fn from_json_str(json: &str) -> AuditLensResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    /// Load a catalog file; `.json` files are read as JSON, anything else as YAML
    pub fn load(path: &Path) -> AuditLensResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AuditLensError::Io(format!(
                "Failed to read catalog file {}: {}",
                path.display(),
                e
            ))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_str(&contents)
        } else {
            Self::from_yaml_str(&contents)
        }
    }

    fn from_file(file: CatalogFile) -> AuditLensResult<Self> {
        let mut catalog = Self::new();
        for meta in file.types {
            catalog.register(meta)?;
        }
        Ok(catalog)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl MetadataCatalog for StaticCatalog {
    fn type_metadata(&self, type_name: &str) -> AuditLensResult<&TypeMetadata> {
        self.types
            .get(type_name)
            .ok_or_else(|| AuditLensError::UnknownType(type_name.to_string()))
    }
}
