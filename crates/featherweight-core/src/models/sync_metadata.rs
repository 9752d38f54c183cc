//! Sync bookkeeping models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last successful sync for a user, as recorded by the remote store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMetadata {
    pub user_id: String,
    pub last_sync_time: DateTime<Utc>,
    pub device_id: String,
    pub device_name: String,
}

/// Identity of this install, used to attribute sync metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    /// Random UUID generated on first use
    pub device_id: String,
    /// Human-readable label, e.g. "linux x86_64"
    pub device_name: String,
}
