//! REST client for the hosted document store.

use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::{DocumentWrite, RemoteDocument, RemoteError, RemoteResult, RemoteStore};
use crate::models::SyncMetadata;
use crate::util::{compact_text, is_http_url};

/// Document store reached over HTTP with a bearer token.
#[derive(Clone)]
pub struct HttpDocumentStore {
    base_url: String,
    access_token: String,
    client: Client,
}

impl std::fmt::Debug for HttpDocumentStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HttpDocumentStore")
            .field("base_url", &self.base_url)
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HttpDocumentStore {
    pub fn new(base_url: &str, access_token: impl Into<String>) -> RemoteResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(RemoteError::InvalidConfiguration(
                "access token must not be empty".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            access_token,
            client: Client::builder().build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, scope: Option<&str>, collection: &str) -> String {
        let collection = urlencoding::encode(collection);
        match scope {
            Some(user_id) => format!(
                "{}/v1/users/{}/collections/{collection}",
                self.base_url,
                urlencoding::encode(user_id)
            ),
            None => format!("{}/v1/reference/{collection}", self.base_url),
        }
    }

    fn metadata_url(&self, user_id: &str) -> String {
        format!(
            "{}/v1/users/{}/sync-metadata",
            self.base_url,
            urlencoding::encode(user_id)
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.access_token)
            .header("Accept", "application/json")
    }
}

#[derive(Debug, Serialize)]
struct UploadRequest {
    documents: Vec<DocumentWrite>,
}

#[derive(Debug, Deserialize)]
struct DocumentsResponse {
    #[serde(default)]
    documents: Vec<RemoteDocument>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MetadataUpdate<'a> {
    device_id: &'a str,
    device_name: &'a str,
}

impl RemoteStore for HttpDocumentStore {
    async fn upload_documents(
        &self,
        user_id: &str,
        collection: &str,
        documents: Vec<DocumentWrite>,
    ) -> RemoteResult<()> {
        let request = self
            .authorized(self.client.put(self.collection_url(Some(user_id), collection)))
            .json(&UploadRequest { documents });
        ensure_success(request.send().await?).await?;
        Ok(())
    }

    async fn download_documents(
        &self,
        scope: Option<&str>,
        collection: &str,
        since: Option<DateTime<Utc>>,
    ) -> RemoteResult<Vec<RemoteDocument>> {
        let mut request = self.authorized(self.client.get(self.collection_url(scope, collection)));
        if let Some(since) = since {
            request = request.query(&[("since", since.to_rfc3339())]);
        }
        let response = ensure_success(request.send().await?).await?;
        let payload = response
            .json::<DocumentsResponse>()
            .await
            .map_err(|error| RemoteError::InvalidPayload(error.to_string()))?;
        Ok(payload.documents)
    }

    async fn get_sync_metadata(&self, user_id: &str) -> RemoteResult<Option<SyncMetadata>> {
        let response = self
            .authorized(self.client.get(self.metadata_url(user_id)))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = ensure_success(response).await?;
        let metadata = response
            .json::<SyncMetadata>()
            .await
            .map_err(|error| RemoteError::InvalidPayload(error.to_string()))?;
        Ok(Some(metadata))
    }

    async fn update_sync_metadata(
        &self,
        user_id: &str,
        device_id: &str,
        device_name: &str,
    ) -> RemoteResult<SyncMetadata> {
        let request = self
            .authorized(self.client.put(self.metadata_url(user_id)))
            .json(&MetadataUpdate {
                device_id,
                device_name,
            });
        let response = ensure_success(request.send().await?).await?;
        response
            .json::<SyncMetadata>()
            .await
            .map_err(|error| RemoteError::InvalidPayload(error.to_string()))
    }
}

pub fn normalize_base_url(url: &str) -> RemoteResult<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(RemoteError::InvalidConfiguration(
            "remote URL must not be empty".to_string(),
        ));
    }
    if !is_http_url(trimmed) {
        return Err(RemoteError::InvalidConfiguration(
            "remote URL must include http:// or https://".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

async fn ensure_success(response: Response) -> RemoteResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: Option<String>,
    message: Option<String>,
}

fn classify_status(status: StatusCode, body: &str) -> RemoteError {
    let message = parse_api_error(status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => RemoteError::PermissionDenied(message),
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT
        | StatusCode::BAD_GATEWAY => RemoteError::Unavailable(message),
        _ => RemoteError::Api(message),
    }
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorResponse>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", compact_text(&message), status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> HttpDocumentStore {
        HttpDocumentStore::new("https://sync.example.com/", "token").unwrap()
    }

    #[test]
    fn base_url_is_normalized() {
        assert_eq!(store().base_url(), "https://sync.example.com");
        assert!(matches!(
            HttpDocumentStore::new("sync.example.com", "token"),
            Err(RemoteError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            HttpDocumentStore::new("https://sync.example.com", "  "),
            Err(RemoteError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn routes_are_scoped_by_user_or_reference_area() {
        let store = store();
        assert_eq!(
            store.collection_url(Some("user 1"), "workouts"),
            "https://sync.example.com/v1/users/user%201/collections/workouts"
        );
        assert_eq!(
            store.collection_url(None, "systemExercises"),
            "https://sync.example.com/v1/reference/systemExercises"
        );
        assert_eq!(
            store.metadata_url("user-1"),
            "https://sync.example.com/v1/users/user-1/sync-metadata"
        );
    }

    #[test]
    fn status_codes_map_to_error_kinds() {
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, r#"{"message":"no access"}"#),
            RemoteError::PermissionDenied(message) if message == "no access (403)"
        ));
        assert!(matches!(
            classify_status(StatusCode::SERVICE_UNAVAILABLE, ""),
            RemoteError::Unavailable(message) if message == "HTTP 503"
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "bad collection"),
            RemoteError::Api(message) if message == "bad collection (400)"
        ));
    }

    #[test]
    fn debug_output_redacts_token() {
        let rendered = format!("{:?}", store());
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("\"token\""));
    }
}
