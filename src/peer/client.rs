//! HTTP client for the peer node.

use axum::body::Bytes;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::PeerConfig;
use crate::http::request::X_REQUEST_ID;
use crate::parsing::Format;

/// Errors that can occur while relaying a request to the peer.
#[derive(Debug, Error)]
pub enum PeerError {
    /// The peer could not be reached or the transfer failed.
    #[error("Error communicating with peer: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The peer answered with an error status.
    #[error("{detail}")]
    Status { status: u16, detail: String },

    /// The peer answered 2xx with a body that is not JSON.
    #[error("Invalid response from peer: {0}")]
    InvalidBody(String),

    /// The configured base URL cannot carry a path.
    #[error("Invalid peer URL '{0}'")]
    InvalidUrl(String),
}

/// Relays parse requests to a peer node.
#[derive(Debug, Clone)]
pub struct PeerClient {
    client: reqwest::Client,
    base_url: Url,
}

impl PeerClient {
    /// Create a client for the configured peer. The peer is not contacted.
    pub fn new(config: &PeerConfig) -> Result<Self, PeerError> {
        let base_url = Url::parse(&config.base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| PeerError::InvalidUrl(config.base_url.clone()))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url,
        })
    }

    /// Forward a single-format request.
    pub async fn fetch_one(
        &self,
        set: &str,
        format: Format,
        request_id: Option<&str>,
    ) -> Result<Bytes, PeerError> {
        self.get(&["parse", set, format.as_str()], request_id).await
    }

    /// Forward an all-formats request.
    pub async fn fetch_all(&self, set: &str, request_id: Option<&str>) -> Result<Bytes, PeerError> {
        self.get(&["parse", set], request_id).await
    }

    async fn get(&self, segments: &[&str], request_id: Option<&str>) -> Result<Bytes, PeerError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| PeerError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        url.query_pairs_mut().append_pair("direct", "true");

        tracing::debug!(url = %url, "Forwarding to peer");

        let mut request = self.client.get(url);
        if let Some(id) = request_id {
            request = request.header(X_REQUEST_ID, id);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let detail = extract_detail(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("peer error").to_string());
            return Err(PeerError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_slice::<serde::de::IgnoredAny>(&body)
            .map_err(|e| PeerError::InvalidBody(e.to_string()))?;

        Ok(body)
    }
}

/// Pull `detail` out of a JSON error body, falling back to the raw text.
fn extract_detail(body: &[u8]) -> Option<String> {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        match value.get("detail") {
            Some(Value::String(detail)) => return Some(detail.clone()),
            Some(other) => return Some(other.to_string()),
            None => {}
        }
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
