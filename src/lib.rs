//! AuditLens - metadata-driven record introspection
//!
//! This library inspects records through an injectable metadata catalog to
//! produce human-readable audit messages for create, update and delete
//! events, query-by-example filter clauses, URL parameter strings and
//! substituted query templates.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Record abstraction, field values and catalog descriptors
//! - `catalog`: Metadata catalog trait and the static implementation
//! - `resolver`: Dotted property path resolution
//! - `normalize`: Canonical comparison/rendering form of field values
//! - `audit`: Audit message engine
//! - `query`: Query clause and parameter map building
//! - `template`: Named parameter substitution
//! - `expression`: Boolean predicate expressions
//! - `snapshot`: Descriptor-driven structural copies
//! - `json`: JSON-backed records
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use auditlens::audit::AuditService;
//! use auditlens::catalog::StaticCatalog;
//! use auditlens::config::AuditLensPaths;
//!
//! let paths = AuditLensPaths::new()?;
//! let catalog = StaticCatalog::load(&paths.catalog_file())?;
//! let message = AuditService::new(&catalog).build_delete_message(&record)?;
//! ```

pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod expression;
pub mod json;
pub mod models;
pub mod normalize;
pub mod query;
pub mod resolver;
pub mod snapshot;
pub mod template;

#[cfg(test)]
mod test_fixtures;

pub use error::{AuditLensError, AuditLensResult};
