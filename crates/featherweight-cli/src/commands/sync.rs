use std::path::Path;

use crate::commands::common::{open_sync_context, report_outcome};
use crate::error::CliError;

pub async fn run_sync(
    user: Option<&str>,
    db_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let context = open_sync_context(db_path, profile).await?;
    let outcome = match user {
        Some(user_id) => context.manager.sync_user_data(user_id).await,
        None => context.manager.sync_all().await,
    };
    report_outcome("Sync", outcome)
}

pub async fn run_sync_system(db_path: &Path, profile: Option<&str>) -> Result<(), CliError> {
    let context = open_sync_context(db_path, profile).await?;
    let outcome = context.manager.sync_system_reference_data().await;
    report_outcome("Exercise catalogue sync", outcome)
}
