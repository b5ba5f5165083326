//! Custom error types for AuditLens
//!
//! This module defines the error hierarchy for the engine using thiserror
//! for ergonomic error definitions. Per-field problems met while building
//! messages, clauses or templates are logged instead of returned, so only
//! strict path resolution, programmer errors and file loading end up here.

use thiserror::Error;

/// The main error type for AuditLens operations
#[derive(Error, Debug)]
pub enum AuditLensError {
    /// A dotted property path could not be resolved
    #[error("Failed to retrieve value for {path}: {cause}")]
    PathResolution { path: String, cause: String },

    /// No metadata registered for the requested record type
    #[error("No metadata registered for type: {0}")]
    UnknownType(String),

    /// Metadata exists but declares no primary field
    #[error("Type {0} does not declare a primary field")]
    NoPrimaryField(String),

    /// Catalog registration rejected the supplied metadata
    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    /// Predicate expression could not be compiled
    #[error("Expression error: {0}")]
    Expression(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),
}

impl AuditLensError {
    /// Create a path resolution error
    pub fn path(path: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::PathResolution {
            path: path.into(),
            cause: cause.into(),
        }
    }

    /// Check if this is a path resolution error
    pub fn is_path_resolution(&self) -> bool {
        matches!(self, Self::PathResolution { .. })
    }

    /// Check if this is an unknown type error
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::UnknownType(_))
    }
}

impl From<std::io::Error> for AuditLensError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AuditLensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for AuditLensError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for AuditLens operations
pub type AuditLensResult<T> = Result<T, AuditLensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuditLensError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_path_error() {
        let err = AuditLensError::path("address.zip", "no accessor for zip");
        assert_eq!(
            err.to_string(),
            "Failed to retrieve value for address.zip: no accessor for zip"
        );
        assert!(err.is_path_resolution());
    }

    #[test]
    fn test_unknown_type_error() {
        let err = AuditLensError::UnknownType("Ninja".into());
        assert_eq!(err.to_string(), "No metadata registered for type: Ninja");
        assert!(err.is_unknown_type());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AuditLensError = io_err.into();
        assert!(matches!(err, AuditLensError::Io(_)));
    }
}
