use log::{debug, error};
use reqwest::Client;
use std::time::Duration;

use crate::config::FetchConfig;
use crate::error::PipelineError;

/// Fetches raw HTML over plain HTTP(S) with a bounded timeout.
///
/// Every failure (transport, non-2xx status, timeout, oversized body)
/// collapses into [`PipelineError::FetchFailed`].
#[derive(Debug, Clone)]
pub struct RequestFetcher {
    client: Client,
    max_bytes: usize,
}

impl RequestFetcher {
    pub fn new(config: &FetchConfig, max_bytes: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self { client, max_bytes })
    }

    pub async fn fetch(&self, url: &str) -> Result<String, PipelineError> {
        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| {
                error!("Failed to fetch {}: {}", url, e);
                PipelineError::FetchFailed
            })?;

        if let Some(len) = response.content_length() {
            if len as usize > self.max_bytes {
                error!("Page {} is {} bytes, limit is {}", url, len, self.max_bytes);
                return Err(PipelineError::FetchFailed);
            }
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            error!("Failed to read body of {}: {}", url, e);
            PipelineError::FetchFailed
        })? {
            if body.len() + chunk.len() > self.max_bytes {
                error!(
                    "Page {} exceeded {} bytes while streaming",
                    url, self.max_bytes
                );
                return Err(PipelineError::FetchFailed);
            }
            body.extend_from_slice(&chunk);
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
