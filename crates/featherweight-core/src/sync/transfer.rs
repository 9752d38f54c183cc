//! Typed download and upload of entity rows over the document port.

use chrono::{DateTime, Utc};

use super::entity::SyncEntity;
use crate::remote::{DocumentWrite, RemoteError, RemoteResult, RemoteStore};

/// Rows decoded from one download, plus how many documents were unreadable
#[derive(Debug, Clone)]
pub struct Download<T> {
    pub rows: Vec<T>,
    pub malformed: usize,
}

/// Download and decode every document of `collection` modified after `since`.
///
/// Documents that do not decode into the remote shape are skipped and logged.
pub async fn download_entities<R, T>(
    remote: &R,
    scope: Option<&str>,
    collection: &str,
    since: Option<DateTime<Utc>>,
) -> RemoteResult<Download<T>>
where
    R: RemoteStore,
    T: SyncEntity,
{
    let documents = remote.download_documents(scope, collection, since).await?;
    let mut rows = Vec::with_capacity(documents.len());
    let mut malformed = 0;

    for document in documents {
        match serde_json::from_value::<T::Remote>(document.data) {
            Ok(shape) => rows.push(T::from_remote(shape)),
            Err(error) => {
                malformed += 1;
                tracing::warn!(
                    collection,
                    document_id = %document.id,
                    %error,
                    "Skipping malformed remote document"
                );
            }
        }
    }

    Ok(Download { rows, malformed })
}

/// Upload the rows owned by `user_id`; rows with any other owner (or none) are
/// never sent. Returns the number of documents uploaded.
pub async fn upload_entities<R, T>(
    remote: &R,
    user_id: &str,
    collection: &str,
    rows: &[T],
) -> RemoteResult<usize>
where
    R: RemoteStore,
    T: SyncEntity,
{
    let documents = rows
        .iter()
        .filter(|row| row.user_id() == Some(user_id))
        .map(|row| {
            let data = serde_json::to_value(row.to_remote())
                .map_err(|error| RemoteError::InvalidPayload(error.to_string()))?;
            Ok(DocumentWrite {
                id: row.id().to_string(),
                data,
            })
        })
        .collect::<RemoteResult<Vec<_>>>()?;

    if documents.is_empty() {
        return Ok(0);
    }

    let count = documents.len();
    remote
        .upload_documents(user_id, collection, documents)
        .await?;
    Ok(count)
}
