use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wt_cli::commands::{import, record, report, status};
use wt_cli::{Cli, Commands, Config};

/// Load config and open the database, ensuring the parent directory
/// exists.
fn open_database(config_path: Option<&Path>) -> Result<(wt_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = wt_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn record_action(cli: &Cli, action: record::Action, label: &str) -> Result<()> {
    let (mut db, _config) = open_database(cli.config.as_deref())?;
    record::run(&mut io::stdout(), &mut db, action, label, Utc::now())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Start { label }) => {
            record_action(&cli, record::Action::Start, label)?;
        }
        Some(Commands::Pause { label }) => {
            record_action(&cli, record::Action::Pause, label.as_deref().unwrap_or(""))?;
        }
        Some(Commands::Resume { label }) => {
            record_action(&cli, record::Action::Resume, label.as_deref().unwrap_or(""))?;
        }
        Some(Commands::Stop { label }) => {
            record_action(&cli, record::Action::Stop, label.as_deref().unwrap_or(""))?;
        }
        Some(Commands::Note { label }) => {
            record_action(&cli, record::Action::Note, label)?;
        }
        Some(Commands::Import { file }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let summary = match file {
                Some(path) => {
                    let reader = BufReader::new(
                        File::open(path)
                            .with_context(|| format!("failed to open {}", path.display()))?,
                    );
                    import::run(reader, &mut db)?
                }
                None => import::run(io::stdin().lock(), &mut db)?,
            };
            println!(
                "Imported {} events ({} skipped).",
                summary.imported, summary.skipped
            );
        }
        Some(Commands::Report { json, calendar }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let calendar = calendar.unwrap_or(config.calendar);
            report::run(&mut io::stdout(), &db, calendar, *json)?;
        }
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            status::run(&mut io::stdout(), &db, &config.database_path, Utc::now())?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
