//! Provider client — the single point of contact with the external analysis provider.
//!
//! One POST per analysis. No retries and no fallback to the local engine: transport
//! failures and error statuses propagate to the caller as they happened. The timeout
//! is whatever the caller configured.

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use crate::models::analysis::{AnalysisRequest, AnalysisResult};

pub mod adapter;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Analysis provider unreachable: {0}")]
    ProviderUnreachable(#[from] reqwest::Error),

    #[error("Analysis provider error (status {status}): {body}")]
    ProviderStatus { status: u16, body: String },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

#[derive(Clone)]
pub struct ProviderClient {
    client: Client,
    url: String,
}

impl ProviderClient {
    /// Client construction errors are returned as-is; `ProviderError` only describes
    /// the exchange with the provider.
    pub fn new(url: String, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            url,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends the request to the provider and normalizes whatever shape comes back.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, ProviderError> {
        let response = self.client.post(&self.url).json(request).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ProviderError::ProviderStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "Provider responded");

        let value: serde_json::Value = serde_json::from_str(strip_json_fences(&body))
            .map_err(|e| ProviderError::MalformedResponse(format!("body is not JSON: {e}")))?;

        adapter::normalize(value)
    }
}

/// Unwraps a payload from a ```json ... ``` (or bare ```) fence. An unterminated
/// fence is unwrapped as far as it goes; unfenced text is returned trimmed.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(fenced) = text.strip_prefix("```") else {
        return text;
    };
    let fenced = fenced.strip_prefix("json").unwrap_or(fenced).trim_start();
    fenced.strip_suffix("```").unwrap_or(fenced).trim()
}
