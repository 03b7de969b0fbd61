use std::sync::Arc;

use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::format::Format;
use crate::outcome::FetchOutcome;

/// Path of the beacon API endpoint, relative to the base URL.
pub const BLOB_SIDECARS_PATH: &str = "/eth/v1/beacon/blob_sidecars";

/// Fetches blob sidecars for a slot or block root.
#[async_trait::async_trait]
pub trait BlobSidecarClient: Send + Sync {
    /// Fetch the sidecars for `id` (a slot number or block root).
    ///
    /// Never fails outright: transport and decode failures are reported
    /// inside the returned [`FetchOutcome`], and any non-200 status is
    /// handed back as-is for the caller to interpret.
    async fn fetch_sidecars(&self, id: &str, format: Format) -> FetchOutcome;
}

#[async_trait::async_trait]
impl<T: BlobSidecarClient + ?Sized> BlobSidecarClient for Arc<T> {
    async fn fetch_sidecars(&self, id: &str, format: Format) -> FetchOutcome {
        (**self).fetch_sidecars(id, format).await
    }
}

/// HTTP implementation against a beacon node or a blob archiver.
///
/// Holds no per-call state; share it freely. Timeouts are whatever the
/// wrapped `reqwest::Client` was built with.
#[derive(Debug, Clone)]
pub struct HttpBlobSidecarClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBlobSidecarClient {
    /// Bind to `base_url` (scheme and host, no path). Performs no I/O.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sidecars_url(&self, id: &str) -> String {
        format!("{}{}/{}", self.base_url, BLOB_SIDECARS_PATH, id)
    }
}

#[async_trait::async_trait]
impl BlobSidecarClient for HttpBlobSidecarClient {
    async fn fetch_sidecars(&self, id: &str, format: Format) -> FetchOutcome {
        let url = self.sidecars_url(id);
        debug!(%url, %format, "fetching blob sidecars");

        let response = match self
            .client
            .get(&url)
            .header(ACCEPT, format.media_type())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "blob sidecar request failed");
                return FetchOutcome::failed(FetchError::Transport(e));
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%url, status = status.as_u16(), "blob sidecar request returned non-200");
            return FetchOutcome::passthrough(status.as_u16());
        }

        {
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok());
            if !format.accepts_content_type(content_type) {
                warn!(
                    %url,
                    requested = format.media_type(),
                    received = content_type.unwrap_or_default(),
                    "content type differs from requested format, decoding as requested"
                );
            }
        }

        // `bytes` consumes the response, so the connection is released on
        // every path below.
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%url, error = %e, "failed to read blob sidecar response");
                return FetchOutcome::failed(FetchError::Body(e));
            }
        };

        match format.decode(&body) {
            Ok(sidecars) => {
                debug!(%url, count = sidecars.len(), "decoded blob sidecars");
                FetchOutcome::found(sidecars)
            }
            Err(e) => {
                warn!(%url, %format, error = %e, "failed to decode blob sidecar response");
                FetchOutcome::failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_path_and_id() {
        let client = HttpBlobSidecarClient::new("http://localhost:5052");
        assert_eq!(
            client.sidecars_url("8626176"),
            "http://localhost:5052/eth/v1/beacon/blob_sidecars/8626176"
        );
    }

    #[test]
    fn trailing_slashes_are_trimmed() {
        let client = HttpBlobSidecarClient::new("http://beacon.example//");
        assert_eq!(client.base_url(), "http://beacon.example");
        assert_eq!(
            client.sidecars_url("head"),
            "http://beacon.example/eth/v1/beacon/blob_sidecars/head"
        );
    }

    #[test]
    fn block_root_ids_pass_through_untouched() {
        let root = "0x2af0a8e5a8a1f8e6b6a3a9b5c3b1f9c6d1e6a8b7c9d0e1f2a3b4c5d6e7f8a9b0";
        let client = HttpBlobSidecarClient::new("http://beacon.example");
        assert!(client.sidecars_url(root).ends_with(root));
    }

    #[tokio::test]
    async fn malformed_base_url_is_a_transport_error() {
        let client = HttpBlobSidecarClient::new("not a url");
        let outcome = client.fetch_sidecars("1", Format::Json).await;

        assert_eq!(outcome.status(), 500);
        assert!(matches!(outcome.error(), Some(FetchError::Transport(_))));
        assert!(outcome.sidecars().is_empty());
    }
}
