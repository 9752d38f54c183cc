use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "featherweight")]
#[command(about = "Sync Featherweight workout data with the cloud")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// CLI profile name holding remote and account settings
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full two-way sync
    Sync {
        /// Sync this user instead of the profile's signed-in user
        #[arg(long, value_name = "ID")]
        user: Option<String>,
    },
    /// Replace local data with the cloud copy
    Restore {
        /// Confirm that local data for the user will be deleted first
        #[arg(long)]
        yes: bool,
    },
    /// Download the shared exercise catalogue
    SyncSystem,
    /// Show device identity, local row counts and remote sync state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Suggest a working weight from a recent set
    Suggest {
        /// Weight lifted in the reference set
        #[arg(long)]
        weight: f32,
        /// Reps completed in the reference set
        #[arg(long)]
        reps: u32,
        /// RPE of the reference set
        #[arg(long)]
        rpe: Option<f32>,
        /// Reps wanted in the next set
        #[arg(long)]
        target_reps: u32,
        /// RPE wanted in the next set
        #[arg(long)]
        target_rpe: Option<f32>,
        /// Smallest load step available
        #[arg(long, default_value_t = featherweight_core::training::DEFAULT_PLATE_INCREMENT)]
        increment: f32,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Base URL of the remote document store
        #[arg(long, value_name = "URL")]
        remote_url: Option<String>,
        /// Account whose data this profile syncs
        #[arg(long, value_name = "ID")]
        user_id: Option<String>,
        /// Label recorded in sync metadata for this device
        #[arg(long, value_name = "NAME")]
        device_name: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Print the resolved profile
    Show {
        /// Profile name to show
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
    },
}
