//! Configuration module for AuditLens
//!
//! This module provides configuration management including:
//! - Config directory resolution
//! - Engine settings persistence

pub mod paths;
pub mod settings;

pub use paths::AuditLensPaths;
pub use settings::EngineSettings;
