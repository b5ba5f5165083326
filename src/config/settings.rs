//! Engine settings for AuditLens
//!
//! Controls date rendering in audit messages, the entity alias used in query
//! clauses and the depth bound for structural copies.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::paths::AuditLensPaths;
use crate::error::AuditLensError;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Pattern for date-only values (strftime format)
    #[serde(default = "default_date_pattern")]
    pub date_pattern: String,

    /// Pattern for values carrying a time of day (strftime format)
    #[serde(default = "default_datetime_pattern")]
    pub datetime_pattern: String,

    /// Alias prefixed to field names in query clauses; empty for bare names
    #[serde(default = "default_query_alias")]
    pub query_alias: String,

    /// Maximum nesting followed by structural copies
    #[serde(default = "default_max_copy_depth")]
    pub max_copy_depth: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_pattern() -> String {
    "%a, %d %b %Y".to_string()
}

fn default_datetime_pattern() -> String {
    "%a, %d %b %Y %H:%M:%S %Z".to_string()
}

fn default_query_alias() -> String {
    "obj".to_string()
}

fn default_max_copy_depth() -> usize {
    8
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_pattern: default_date_pattern(),
            datetime_pattern: default_datetime_pattern(),
            query_alias: default_query_alias(),
            max_copy_depth: default_max_copy_depth(),
        }
    }
}

impl EngineSettings {
    /// Load settings from the config directory, or defaults if the file doesn't exist
    pub fn load_or_default(paths: &AuditLensPaths) -> Result<Self, AuditLensError> {
        Self::load_file_or_default(&paths.settings_file())
    }

    /// Load settings from an explicit file, or defaults if it doesn't exist
    pub fn load_file_or_default(path: &Path) -> Result<Self, AuditLensError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            AuditLensError::Io(format!("Failed to read settings file: {}", e))
        })?;

        let settings: EngineSettings = serde_json::from_str(&contents).map_err(|e| {
            AuditLensError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &AuditLensPaths) -> Result<(), AuditLensError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AuditLensError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            AuditLensError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Check that both date patterns are valid strftime formats
    pub fn validate(&self) -> Result<(), AuditLensError> {
        for (name, pattern) in [
            ("date_pattern", &self.date_pattern),
            ("datetime_pattern", &self.datetime_pattern),
        ] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(AuditLensError::Config(format!(
                    "Invalid {}: '{}'",
                    name, pattern
                )));
            }
        }
        Ok(())
    }

    /// Qualify a field name with the query alias
    pub fn qualify(&self, field: &str) -> String {
        if self.query_alias.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", self.query_alias, field)
        }
    }
}
