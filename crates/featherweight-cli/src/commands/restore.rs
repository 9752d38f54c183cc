use std::path::Path;

use crate::commands::common::{open_sync_context, report_outcome};
use crate::error::CliError;

pub async fn run_restore(
    confirmed: bool,
    db_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::RestoreNotConfirmed);
    }

    let context = open_sync_context(db_path, profile).await?;
    if let Some(user_id) = context.user_id.as_deref() {
        tracing::warn!(user_id, "Replacing local data with the cloud copy");
    }
    let outcome = context.manager.restore_from_cloud().await;
    report_outcome("Restore", outcome)
}
