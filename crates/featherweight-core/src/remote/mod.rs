//! Remote document store adapters.
//!
//! The remote side is a document database: each user owns named collections
//! of JSON documents, and a shared reference area holds the system exercise
//! catalogue. Documents carry a server-assigned `last_modified` stamp used to
//! answer "modified since" queries.

mod http;
mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SyncMetadata;

pub use http::HttpDocumentStore;
pub use memory::MemoryDocumentStore;

/// Collection holding the shared exercise catalogue
pub const SYSTEM_EXERCISES_COLLECTION: &str = "systemExercises";

/// Pseudo-collection name used for sync metadata operations
pub const SYNC_METADATA_COLLECTION: &str = "syncMetadata";

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid remote configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Remote HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error: {0}")]
    Api(String),
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid remote payload: {0}")]
    InvalidPayload(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// A stored document as returned by a download
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDocument {
    pub id: String,
    pub data: serde_json::Value,
    pub last_modified: DateTime<Utc>,
}

/// A document to create or replace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentWrite {
    pub id: String,
    pub data: serde_json::Value,
}

/// Operations the sync layer needs from the remote store.
///
/// Every call reports failure explicitly; nothing here is assumed to succeed.
#[allow(async_fn_in_trait)]
pub trait RemoteStore {
    /// Create or replace documents in one of the user's collections.
    async fn upload_documents(
        &self,
        user_id: &str,
        collection: &str,
        documents: Vec<DocumentWrite>,
    ) -> RemoteResult<()>;

    /// Documents of a collection modified after `since` (all when `None`).
    ///
    /// `scope` is the owning user, or `None` for the shared reference area.
    async fn download_documents(
        &self,
        scope: Option<&str>,
        collection: &str,
        since: Option<DateTime<Utc>>,
    ) -> RemoteResult<Vec<RemoteDocument>>;

    async fn get_sync_metadata(&self, user_id: &str) -> RemoteResult<Option<SyncMetadata>>;

    /// Stamp a successful sync for the user and return the stored record.
    async fn update_sync_metadata(
        &self,
        user_id: &str,
        device_id: &str,
        device_name: &str,
    ) -> RemoteResult<SyncMetadata>;
}
