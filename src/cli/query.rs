//! Query CLI commands
//!
//! Builds filter clauses, URL parameters and substituted templates from
//! records read from JSON files.

use clap::Subcommand;
use std::path::PathBuf;

use crate::catalog::MetadataCatalog;
use crate::config::EngineSettings;
use crate::error::AuditLensResult;
use crate::json::JsonRecord;
use crate::query::{build_url_parameters, QueryBuilder};
use crate::template::replace_parameters;

/// Query subcommands
#[derive(Subcommand)]
pub enum QueryCommands {
    /// Print the filter clause for an example record
    Query {
        /// Example record JSON file
        example: PathBuf,
        /// Match text fields exactly instead of by substring
        #[arg(long)]
        exact: bool,
    },

    /// Print the URL parameter string for a record
    Params {
        /// Record JSON file
        record: PathBuf,
    },

    /// Replace :name tokens in a template with values from a record
    Substitute {
        /// Template text
        template: String,
        /// Record JSON file
        record: PathBuf,
    },
}

/// Handle a query command
pub fn handle_query_command(
    catalog: &dyn MetadataCatalog,
    settings: &EngineSettings,
    cmd: QueryCommands,
) -> AuditLensResult<()> {
    let output = run_query_command(catalog, settings, &cmd)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

fn run_query_command(
    catalog: &dyn MetadataCatalog,
    settings: &EngineSettings,
    cmd: &QueryCommands,
) -> AuditLensResult<String> {
    let output = match cmd {
        QueryCommands::Query { example, exact } => {
            let example = JsonRecord::load(example)?;
            QueryBuilder::with_settings(catalog, settings).build_query_clause(&example, *exact)?
        }
        QueryCommands::Params { record } => {
            let record = JsonRecord::load(record)?;
            build_url_parameters(catalog, &record)?
        }
        QueryCommands::Substitute { template, record } => {
            let record = JsonRecord::load(record)?;
            replace_parameters(template, &record)
        }
    };
    Ok(output)
}
