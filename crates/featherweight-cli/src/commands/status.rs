use std::path::Path;

use featherweight_core::db::{Database, LibSqlStore};
use featherweight_core::models::{DeviceIdentity, SyncMetadata};
use featherweight_core::remote::RemoteStore;
use featherweight_core::sync::EntityKind;
use serde::Serialize;

use crate::commands::common::{
    format_timestamp, load_device, load_profile, remote_store, resolve_settings,
};
use crate::error::CliError;

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub device_id: String,
    pub device_name: String,
    pub user_id: Option<String>,
    pub local_counts: Vec<EntityCount>,
    pub remote: RemoteStatus,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct EntityCount {
    pub entity: String,
    pub rows: u64,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RemoteStatus {
    NotConfigured,
    NeverSynced,
    Synced {
        last_sync_time: String,
        device_id: String,
        device_name: String,
    },
    Unreachable {
        error: String,
    },
}

impl From<Option<SyncMetadata>> for RemoteStatus {
    fn from(metadata: Option<SyncMetadata>) -> Self {
        metadata.map_or(Self::NeverSynced, |metadata| Self::Synced {
            last_sync_time: format_timestamp(metadata.last_sync_time),
            device_id: metadata.device_id,
            device_name: metadata.device_name,
        })
    }
}

pub async fn run_status(
    as_json: bool,
    db_path: &Path,
    profile: Option<&str>,
) -> Result<(), CliError> {
    let profile = load_profile(profile)?;
    let settings = resolve_settings(&profile)?;
    let db = Database::open(db_path).await?;
    let device = load_device(&db, &settings).await?;
    let user_id = profile.user_id();

    let local_counts = match user_id.as_deref() {
        Some(user_id) => local_counts(&db.store(), user_id).await?,
        None => Vec::new(),
    };

    let remote = match (remote_store(&settings), user_id.as_deref()) {
        (Ok(remote), Some(user_id)) => match remote.get_sync_metadata(user_id).await {
            Ok(metadata) => RemoteStatus::from(metadata),
            Err(error) => RemoteStatus::Unreachable {
                error: error.to_string(),
            },
        },
        _ => RemoteStatus::NotConfigured,
    };

    let report = build_report(device, user_id, local_counts, remote);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in format_status_lines(&report) {
            println!("{line}");
        }
    }
    Ok(())
}

pub async fn local_counts(
    store: &LibSqlStore,
    user_id: &str,
) -> Result<Vec<EntityCount>, CliError> {
    let mut counts = Vec::with_capacity(EntityKind::ALL.len());
    for kind in EntityKind::ALL {
        counts.push(EntityCount {
            entity: kind.table_name().to_string(),
            rows: store.count_kind_for_user(kind, user_id).await?,
        });
    }
    Ok(counts)
}

fn build_report(
    device: DeviceIdentity,
    user_id: Option<String>,
    local_counts: Vec<EntityCount>,
    remote: RemoteStatus,
) -> StatusReport {
    StatusReport {
        device_id: device.device_id,
        device_name: device.device_name,
        user_id,
        local_counts,
        remote,
    }
}

pub fn format_status_lines(report: &StatusReport) -> Vec<String> {
    let mut lines = vec![
        format!("Device: {} ({})", report.device_name, report.device_id),
        format!(
            "User: {}",
            report.user_id.as_deref().unwrap_or("not signed in")
        ),
    ];

    let remote = match &report.remote {
        RemoteStatus::NotConfigured => "not configured".to_string(),
        RemoteStatus::NeverSynced => "never synced".to_string(),
        RemoteStatus::Synced {
            last_sync_time,
            device_name,
            ..
        } => format!("last synced {last_sync_time} from {device_name}"),
        RemoteStatus::Unreachable { error } => format!("unreachable ({error})"),
    };
    lines.push(format!("Remote: {remote}"));

    let non_empty = report
        .local_counts
        .iter()
        .filter(|count| count.rows > 0)
        .collect::<Vec<_>>();
    if non_empty.is_empty() {
        lines.push("Local: no rows".to_string());
    } else {
        lines.push("Local:".to_string());
        lines.extend(
            non_empty
                .into_iter()
                .map(|count| format!("  {:<26} {}", count.entity, count.rows)),
        );
    }
    lines
}
