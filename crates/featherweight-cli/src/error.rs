use featherweight_core::remote::RemoteError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] featherweight_core::Error),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Sync failed: {0}")]
    Sync(String),
    #[error("Restore deletes all local data for the user. Re-run with --yes to confirm.")]
    RestoreNotConfirmed,
    #[error(
        "Sync is not configured. Run `featherweight config init --remote-url <URL> --user-id <ID>` and set FEATHERWEIGHT_ACCESS_TOKEN."
    )]
    SyncNotConfigured,
}
