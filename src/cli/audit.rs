//! Audit CLI commands
//!
//! Renders create, update and delete messages for records read from JSON
//! files.

use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::audit::AuditService;
use crate::catalog::MetadataCatalog;
use crate::config::EngineSettings;
use crate::error::AuditLensResult;
use crate::json::JsonRecord;
use crate::normalize::ValueNormalizer;

/// Audit subcommands
#[derive(Subcommand)]
pub enum AuditCommands {
    /// Print the audit message for a newly created record
    Create {
        /// Record JSON file
        record: PathBuf,
    },

    /// Print the audit message for a deleted record
    Delete {
        /// Record JSON file
        record: PathBuf,
    },

    /// Print the audit message describing changes between two versions
    Update {
        /// Record JSON file before the change
        old: PathBuf,
        /// Record JSON file after the change
        new: PathBuf,
    },

    /// List the names of fields that changed, one per line
    Changed {
        /// Record JSON file before the change
        old: PathBuf,
        /// Record JSON file after the change
        new: PathBuf,
    },
}

/// Handle an audit command
pub fn handle_audit_command(
    catalog: &dyn MetadataCatalog,
    settings: &EngineSettings,
    cmd: AuditCommands,
) -> AuditLensResult<()> {
    let output = run_audit_command(catalog, settings, &cmd)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn run_audit_command(
    catalog: &dyn MetadataCatalog,
    settings: &EngineSettings,
    cmd: &AuditCommands,
) -> AuditLensResult<String> {
    let service = AuditService::with_normalizer(catalog, ValueNormalizer::new(settings));

    let output = match cmd {
        AuditCommands::Create { record } => {
            let record = load(record)?;
            service.build_create_message(&record)?.text
        }
        AuditCommands::Delete { record } => {
            let record = load(record)?;
            service.build_delete_message(&record)?.text
        }
        AuditCommands::Update { old, new } => {
            let (old, new) = (load(old)?, load(new)?);
            service.build_update_message(&old, &new)?.text
        }
        AuditCommands::Changed { old, new } => {
            let (old, new) = (load(old)?, load(new)?);
            service.changed_fields(&old, &new)?.join("\n")
        }
    };
    Ok(output)
}

fn load(path: &Path) -> AuditLensResult<JsonRecord> {
    tracing::debug!("Loading record from {}", path.display());
    JsonRecord::load(path)
}
