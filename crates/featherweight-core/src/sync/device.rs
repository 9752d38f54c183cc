//! Device identity used to attribute sync metadata.

use crate::db::PreferencesRepository;
use crate::error::Result;
use crate::models::{new_entity_id, DeviceIdentity};
use crate::util::normalize_text_option;

const DEVICE_ID_KEY: &str = "sync.device_id";

/// Load this install's identity, generating and persisting the id on first use.
pub async fn load_or_create_device_identity<P: PreferencesRepository>(
    preferences: &P,
    name_override: Option<&str>,
) -> Result<DeviceIdentity> {
    let device_id = match preferences.get(DEVICE_ID_KEY).await? {
        Some(id) if !id.trim().is_empty() => id,
        _ => {
            let id = new_entity_id();
            preferences.set(DEVICE_ID_KEY, &id).await?;
            tracing::info!(device_id = %id, "Generated new device id");
            id
        }
    };

    let device_name = normalize_text_option(name_override.map(str::to_string))
        .unwrap_or_else(default_device_name);

    Ok(DeviceIdentity {
        device_id,
        device_name,
    })
}

/// Label for the running host, e.g. "linux x86_64"
pub fn default_device_name() -> String {
    format!("{} {}", std::env::consts::OS, std::env::consts::ARCH)
}
