use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use auditlens::catalog::StaticCatalog;
use auditlens::cli::{handle_audit_command, handle_eval_command, handle_query_command};
use auditlens::config::{AuditLensPaths, EngineSettings};

#[derive(Parser)]
#[command(
    name = "auditlens",
    version,
    about = "Audit messages, query clauses and templates from record metadata",
    long_about = "AuditLens renders human-readable audit messages for record changes, \
                  builds query-by-example filter clauses and substitutes named \
                  parameters, all driven by a declarative metadata catalog."
)]
struct Cli {
    /// Metadata catalog file (YAML or JSON); defaults to catalog.yaml in the config directory
    #[arg(long, global = true, env = "AUDITLENS_CATALOG")]
    catalog: Option<PathBuf>,

    /// Engine settings file; defaults to settings.json in the config directory
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Log debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Audit(auditlens::cli::AuditCommands),

    #[command(flatten)]
    Query(auditlens::cli::QueryCommands),

    /// Evaluate a predicate expression against a record
    Eval {
        /// Expression, e.g. "age >= 18 and status == 'ACTIVE'"
        expression: String,
        /// Record JSON file
        record: PathBuf,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // The config directory is only resolved when a default file is needed
    let settings = match &cli.settings {
        Some(path) => EngineSettings::load_file_or_default(path)?,
        None => EngineSettings::load_or_default(&AuditLensPaths::new()?)?,
    };

    match cli.command {
        Commands::Audit(cmd) => {
            let catalog = load_catalog(&catalog_path(cli.catalog)?)?;
            handle_audit_command(&catalog, &settings, cmd)?;
        }
        Commands::Query(cmd) => {
            let catalog = load_catalog(&catalog_path(cli.catalog)?)?;
            handle_query_command(&catalog, &settings, cmd)?;
        }
        Commands::Eval { expression, record } => {
            handle_eval_command(&expression, &record)?;
        }
        Commands::Config => {
            let paths = AuditLensPaths::new()?;
            let catalog_path = cli.catalog.unwrap_or_else(|| paths.catalog_file());
            println!("AuditLens Configuration");
            println!("=======================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Catalog file:     {}", catalog_path.display());
            println!();
            println!("Settings:");
            println!("  Date pattern:     {}", settings.date_pattern);
            println!("  Datetime pattern: {}", settings.datetime_pattern);
            println!("  Query alias:      {}", settings.query_alias);
            println!("  Max copy depth:   {}", settings.max_copy_depth);
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("AUDITLENS_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn catalog_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(AuditLensPaths::new()?.catalog_file()),
    }
}

fn load_catalog(path: &Path) -> Result<StaticCatalog> {
    StaticCatalog::load(path)
        .with_context(|| format!("Failed to load metadata catalog from {}", path.display()))
}
