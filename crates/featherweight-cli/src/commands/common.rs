use std::env;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use featherweight_core::config::{SettingsOverrides, SyncSettings};
use featherweight_core::db::{Database, LibSqlStore};
use featherweight_core::models::DeviceIdentity;
use featherweight_core::remote::HttpDocumentStore;
use featherweight_core::sync::{load_or_create_device_identity, StaticAuthProvider};
use featherweight_core::util::normalize_text_option;
use featherweight_core::{SyncManager, SyncOutcome};

use crate::config_profiles::{CliProfile, CliProfilesConfig};
use crate::error::CliError;

const ENV_DB_PATH: &str = "FEATHERWEIGHT_DB_PATH";
const ENV_ACCESS_TOKEN: &str = "FEATHERWEIGHT_ACCESS_TOKEN";

pub type CliSyncManager = SyncManager<LibSqlStore, HttpDocumentStore, StaticAuthProvider>;

/// Everything a sync command needs, resolved from flags, profile and environment
pub struct SyncContext {
    /// Keeps the database handle alive for the store's connection
    _db: Database,
    pub manager: CliSyncManager,
    pub user_id: Option<String>,
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os(ENV_DB_PATH).map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("featherweight").join("featherweight.db"))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI data directory".to_string()))
}

pub fn load_profile(profile: Option<&str>) -> Result<CliProfile, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let name = config.resolve_profile_name(profile);
    tracing::debug!(profile = %name, "Resolved CLI profile");
    Ok(config.profile(&name).cloned().unwrap_or_default())
}

/// Profile values overlaid with `FEATHERWEIGHT_*` environment overrides
pub fn resolve_settings(profile: &CliProfile) -> Result<SyncSettings, CliError> {
    let overrides = SettingsOverrides::from_env()?;
    Ok(profile.sync_settings().with_overrides(overrides))
}

pub async fn load_device(
    db: &Database,
    settings: &SyncSettings,
) -> Result<DeviceIdentity, CliError> {
    let preferences = db.preferences();
    Ok(load_or_create_device_identity(&preferences, settings.device_name.as_deref()).await?)
}

pub fn remote_store(settings: &SyncSettings) -> Result<HttpDocumentStore, CliError> {
    let remote_url = settings
        .remote_url
        .as_deref()
        .ok_or(CliError::SyncNotConfigured)?;
    let token =
        normalize_text_option(env::var(ENV_ACCESS_TOKEN).ok()).ok_or(CliError::SyncNotConfigured)?;
    Ok(HttpDocumentStore::new(remote_url, token)?)
}

pub async fn open_sync_context(
    db_path: &Path,
    profile: Option<&str>,
) -> Result<SyncContext, CliError> {
    let profile = load_profile(profile)?;
    let settings = resolve_settings(&profile)?;
    let remote = remote_store(&settings)?;

    let db = Database::open(db_path).await?;
    let device = load_device(&db, &settings).await?;
    let user_id = profile.user_id();
    let auth = user_id
        .clone()
        .map_or_else(StaticAuthProvider::signed_out, StaticAuthProvider::signed_in);

    let manager = SyncManager::new(db.store(), remote, auth, device, &settings);
    Ok(SyncContext {
        _db: db,
        manager,
        user_id,
    })
}

/// Print an outcome; `Error` becomes a CLI failure.
pub fn report_outcome(operation: &str, outcome: SyncOutcome) -> Result<(), CliError> {
    match outcome {
        SyncOutcome::Success(at) => {
            println!("{operation} completed at {}", format_timestamp(at));
            Ok(())
        }
        SyncOutcome::Skipped(reason) => {
            println!("{operation} skipped: {reason}");
            Ok(())
        }
        SyncOutcome::Error(message) => Err(CliError::Sync(message)),
    }
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
