//! Featherweight CLI - run and inspect cloud sync from the terminal

mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::commands::common::resolve_db_path;
use crate::commands::config::run_config;
use crate::commands::restore::run_restore;
use crate::commands::status::run_status;
use crate::commands::suggest::{run_suggest, SuggestRequest};
use crate::commands::sync::{run_sync, run_sync_system};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("featherweight=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Sync { user } => {
            let db_path = resolve_db_path(cli.db_path)?;
            run_sync(user.as_deref(), &db_path, profile).await?;
        }
        Commands::Restore { yes } => {
            let db_path = resolve_db_path(cli.db_path)?;
            run_restore(yes, &db_path, profile).await?;
        }
        Commands::SyncSystem => {
            let db_path = resolve_db_path(cli.db_path)?;
            run_sync_system(&db_path, profile).await?;
        }
        Commands::Status { json } => {
            let db_path = resolve_db_path(cli.db_path)?;
            run_status(json, &db_path, profile).await?;
        }
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Suggest {
            weight,
            reps,
            rpe,
            target_reps,
            target_rpe,
            increment,
        } => run_suggest(SuggestRequest {
            weight,
            reps,
            rpe,
            target_reps,
            target_rpe,
            increment,
        })?,
    }

    Ok(())
}
