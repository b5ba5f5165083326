//! Path management for AuditLens
//!
//! Resolves where settings and the metadata catalog live.
//!
//! ## Path Resolution Order
//!
//! 1. `AUDITLENS_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/auditlens` or `~/.config/auditlens`
//! 3. Windows: `%APPDATA%\auditlens`

use std::path::PathBuf;

use crate::error::AuditLensError;

/// Manages all paths used by AuditLens
#[derive(Debug, Clone)]
pub struct AuditLensPaths {
    /// Base directory for all AuditLens configuration
    base_dir: PathBuf,
}

impl AuditLensPaths {
    /// Create a new AuditLensPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home or config directory can be determined.
    pub fn new() -> Result<Self, AuditLensError> {
        let base_dir = if let Ok(custom) = std::env::var("AUDITLENS_CONFIG_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create AuditLensPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.config/auditlens/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    /// Get the path to the default metadata catalog
    pub fn catalog_file(&self) -> PathBuf {
        self.base_dir.join("catalog.yaml")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), AuditLensError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            AuditLensError::Io(format!("Failed to create config directory: {}", e))
        })?;
        Ok(())
    }
}

/// Resolve the default config directory path based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, AuditLensError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("auditlens"));
    }
    let home = std::env::var("HOME").map_err(|_| {
        AuditLensError::Config("Could not determine HOME directory".into())
    })?;
    Ok(PathBuf::from(home).join(".config").join("auditlens"))
}

/// Resolve the default config directory path based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, AuditLensError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| AuditLensError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("auditlens"))
}
