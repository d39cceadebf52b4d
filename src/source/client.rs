//! HTTP client and the `DataSource` that owns the endpoint.

use anyhow::Result;
use reqwest::header;
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

use super::types::{ErrorBody, FetchError, REQUEST_TIMEOUT};
use crate::article::Dataset;
use crate::TARGET_WEB_REQUEST;

/// Create the client used for dataset requests.
pub fn create_http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .gzip(true)
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {}", e))
}

/// Fetches the scored-article array from a fixed endpoint.
#[derive(Debug, Clone)]
pub struct DataSource {
    client: reqwest::Client,
    url: Url,
}

impl DataSource {
    pub fn new(url: Url) -> Result<Self> {
        Ok(DataSource {
            client: create_http_client()?,
            url,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issues one request and decodes the body.
    ///
    /// Non-success statuses carry the server's `error` message when it sent one.
    pub async fn load(&self) -> Result<Dataset, FetchError> {
        info!(target: TARGET_WEB_REQUEST, "Loading dataset from {}", self.url);

        let request = self
            .client
            .get(self.url.clone())
            .header(header::ACCEPT, "application/json")
            .send();

        let response = match timeout(REQUEST_TIMEOUT, request).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) if e.is_timeout() => return Err(FetchError::Timeout(REQUEST_TIMEOUT)),
            Ok(Err(e)) => {
                warn!(target: TARGET_WEB_REQUEST, "Request to {} failed: {}", self.url, e);
                return Err(FetchError::Network(e));
            }
            Err(_) => return Err(FetchError::Timeout(REQUEST_TIMEOUT)),
        };

        let status = response.status();
        debug!(target: TARGET_WEB_REQUEST, "Request to {} returned {}", self.url, status);
        let body = response.bytes().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("unexpected status")
                        .to_string()
                });
            warn!(target: TARGET_WEB_REQUEST, "Data endpoint returned {}: {}", status, detail);
            return Err(FetchError::Status { status, detail });
        }

        let dataset: Dataset = serde_json::from_slice(&body)?;
        info!(target: TARGET_WEB_REQUEST, "Loaded {} articles", dataset.len());
        Ok(dataset)
    }
}
