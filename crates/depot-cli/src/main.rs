use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use depot_cli::commands::{add, delete, entries, loadout, pays, reset, status, sync, transfer};
use depot_cli::{Cli, Commands, Config};
use depot_db::{Database, TotalsEngine};

/// Load config and open the totals engine, ensuring the parent directory exists.
fn open_engine(config_path: Option<&Path>) -> Result<TotalsEngine> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = Database::open(&config.database_path).context("failed to open database")?;
    TotalsEngine::open(db).context("failed to load stored totals")
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

    let mut stdout = std::io::stdout();

    match cli.command {
        Some(Commands::Add {
            category,
            chiller,
            total,
            kilograms,
            worker,
            shooter,
        }) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            add::run(
                &mut stdout,
                &mut engine,
                add::AddArgs {
                    category,
                    chiller,
                    total,
                    kilograms,
                    worker,
                    shooter,
                },
            )?;
        }
        Some(Commands::Delete { id }) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            delete::run(&mut stdout, &mut engine, &id)?;
        }
        Some(Commands::Entries { chiller, json }) => {
            let engine = open_engine(cli.config.as_deref())?;
            entries::run(&mut stdout, engine.db(), chiller, json)?;
        }
        Some(Commands::Status { json }) => {
            let engine = open_engine(cli.config.as_deref())?;
            status::run(&mut stdout, &engine, json)?;
        }
        Some(Commands::Reset { target }) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            reset::run(&mut stdout, &mut engine, &target)?;
        }
        Some(Commands::Loadout { chiller, quantity }) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            loadout::run(&mut stdout, &mut engine, chiller, quantity)?;
        }
        Some(Commands::Transfer { from, to, quantity }) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            transfer::run(&mut stdout, &mut engine, from, to, quantity)?;
        }
        Some(Commands::Sync) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            sync::run(&mut stdout, &mut engine)?;
        }
        Some(Commands::Pays { before }) => {
            let mut engine = open_engine(cli.config.as_deref())?;
            pays::run(&mut stdout, &mut engine, before.as_deref())?;
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
