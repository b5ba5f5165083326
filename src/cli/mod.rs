//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the engine.

pub mod audit;
pub mod eval;
pub mod query;

pub use audit::{handle_audit_command, AuditCommands};
pub use eval::handle_eval_command;
pub use query::{handle_query_command, QueryCommands};
