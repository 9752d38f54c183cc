//! In-process document store, shared between clones.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

use super::{
    DocumentWrite, RemoteDocument, RemoteError, RemoteResult, RemoteStore,
    SYNC_METADATA_COLLECTION,
};
use crate::models::SyncMetadata;

type Scope = Option<String>;

#[derive(Debug, Default)]
struct MemoryState {
    collections: HashMap<(Scope, String), BTreeMap<String, RemoteDocument>>,
    metadata: HashMap<String, SyncMetadata>,
    calls: usize,
    failing: HashSet<String>,
}

/// Document store kept in memory.
///
/// Counts every remote call and can be told to fail operations on chosen
/// collections, which makes it the remote collaborator for sync tests and
/// offline runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of store operations served so far
    pub fn call_count(&self) -> usize {
        self.state().calls
    }

    /// Make every operation on `collection` fail until cleared.
    ///
    /// Use [`SYNC_METADATA_COLLECTION`] to fail metadata reads and writes.
    pub fn fail_collection(&self, collection: impl Into<String>) {
        self.state().failing.insert(collection.into());
    }

    pub fn clear_failures(&self) {
        self.state().failing.clear();
    }

    /// Store a document directly, bypassing call counting.
    pub fn put_document(
        &self,
        scope: Option<&str>,
        collection: &str,
        id: impl Into<String>,
        data: serde_json::Value,
    ) {
        let id = id.into();
        let document = RemoteDocument {
            id: id.clone(),
            data,
            last_modified: Utc::now(),
        };
        self.state()
            .collections
            .entry((scope.map(str::to_string), collection.to_string()))
            .or_default()
            .insert(id, document);
    }

    /// Snapshot of a collection, ordered by id
    pub fn documents(&self, scope: Option<&str>, collection: &str) -> Vec<RemoteDocument> {
        self.state()
            .collections
            .get(&(scope.map(str::to_string), collection.to_string()))
            .map(|documents| documents.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn document_count(&self, scope: Option<&str>, collection: &str) -> usize {
        self.state()
            .collections
            .get(&(scope.map(str::to_string), collection.to_string()))
            .map_or(0, BTreeMap::len)
    }

    /// Record a call and fail it when the collection is marked failing.
    fn begin_call(&self, collection: &str) -> RemoteResult<MutexGuard<'_, MemoryState>> {
        let mut state = self.state();
        state.calls += 1;
        if state.failing.contains(collection) {
            return Err(RemoteError::Unavailable(format!(
                "injected failure for {collection}"
            )));
        }
        Ok(state)
    }
}

impl RemoteStore for MemoryDocumentStore {
    async fn upload_documents(
        &self,
        user_id: &str,
        collection: &str,
        documents: Vec<DocumentWrite>,
    ) -> RemoteResult<()> {
        let mut state = self.begin_call(collection)?;
        let now = Utc::now();
        let stored = state
            .collections
            .entry((Some(user_id.to_string()), collection.to_string()))
            .or_default();
        for document in documents {
            stored.insert(
                document.id.clone(),
                RemoteDocument {
                    id: document.id,
                    data: document.data,
                    last_modified: now,
                },
            );
        }
        Ok(())
    }

    async fn download_documents(
        &self,
        scope: Option<&str>,
        collection: &str,
        since: Option<DateTime<Utc>>,
    ) -> RemoteResult<Vec<RemoteDocument>> {
        let state = self.begin_call(collection)?;
        let documents = state
            .collections
            .get(&(scope.map(str::to_string), collection.to_string()))
            .map(|documents| {
                documents
                    .values()
                    .filter(|document| since.is_none_or(|since| document.last_modified > since))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(documents)
    }

    async fn get_sync_metadata(&self, user_id: &str) -> RemoteResult<Option<SyncMetadata>> {
        let state = self.begin_call(SYNC_METADATA_COLLECTION)?;
        Ok(state.metadata.get(user_id).cloned())
    }

    async fn update_sync_metadata(
        &self,
        user_id: &str,
        device_id: &str,
        device_name: &str,
    ) -> RemoteResult<SyncMetadata> {
        let mut state = self.begin_call(SYNC_METADATA_COLLECTION)?;
        let metadata = SyncMetadata {
            user_id: user_id.to_string(),
            last_sync_time: Utc::now(),
            device_id: device_id.to_string(),
            device_name: device_name.to_string(),
        };
        state
            .metadata
            .insert(user_id.to_string(), metadata.clone());
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread")]
    async fn upload_then_download_roundtrips_documents() {
        let store = MemoryDocumentStore::new();
        store
            .upload_documents(
                "user-1",
                "workouts",
                vec![DocumentWrite {
                    id: "w1".to_string(),
                    data: json!({ "name": "Push" }),
                }],
            )
            .await
            .unwrap();

        let documents = store
            .download_documents(Some("user-1"), "workouts", None)
            .await
            .unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].data, json!({ "name": "Push" }));
        assert!(store
            .download_documents(Some("user-2"), "workouts", None)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(store.call_count(), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn since_filter_excludes_older_documents() {
        let store = MemoryDocumentStore::new();
        store.put_document(Some("user-1"), "workouts", "w1", json!({}));
        let cutoff = Utc::now();

        let documents = store
            .download_documents(Some("user-1"), "workouts", Some(cutoff))
            .await
            .unwrap();
        assert!(documents.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn injected_failure_is_reported_and_counted() {
        let store = MemoryDocumentStore::new();
        store.fail_collection(SYNC_METADATA_COLLECTION);

        let result = store.get_sync_metadata("user-1").await;
        assert!(matches!(result, Err(RemoteError::Unavailable(_))));
        assert_eq!(store.call_count(), 1);

        store.clear_failures();
        let metadata = store
            .update_sync_metadata("user-1", "device", "linux x86_64")
            .await
            .unwrap();
        assert_eq!(
            store.get_sync_metadata("user-1").await.unwrap(),
            Some(metadata)
        );
    }
}
