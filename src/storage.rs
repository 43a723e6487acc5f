//! Public blob storage for uploaded images.

use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("blob storage token is not configured")]
    NotConfigured,

    #[error("blob storage request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("blob storage rejected the upload: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Somewhere to put a file and get a public URL back.
#[async_trait]
pub trait BlobStore: Send + Sync {
    async fn put(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError>;
}

/// Vercel Blob compatible store: `PUT {api_url}/{pathname}` with a bearer token.
pub struct HttpBlobStore {
    client: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct PutResponse {
    url: String,
}

impl HttpBlobStore {
    pub fn new(api_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl BlobStore for HttpBlobStore {
    async fn put(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let token = self.token.as_deref().ok_or(StorageError::NotConfigured)?;
        let url = format!("{}/{}", self.api_url, pathname);

        tracing::debug!(%url, size = bytes.len(), "Uploading blob");

        let response = self
            .client
            .put(&url)
            .bearer_auth(token)
            .header("x-api-version", "7")
            .header("x-content-type", content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let PutResponse { url } = response.json().await?;
        Ok(url)
    }
}
