//! HTTP request execution.

use std::time::{Duration, Instant};

use anyhow::Context;

use crate::payload::OrderPayload;

/// Result of a single order request.
#[derive(Debug)]
pub struct SendResult {
    pub status: u16,
    pub elapsed: Duration,
    pub body: String,
}

/// Issues order payloads to the clustering endpoint.
pub struct OrderClient {
    client: reqwest::Client,
}

impl OrderClient {
    /// Create a client with an explicit request timeout. The timeout is
    /// the run's deadline: a request that exceeds it fails as a transport
    /// error.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// POST the payload as JSON, exactly once. No retries.
    ///
    /// Elapsed time is measured around the network exchange only (request
    /// send through body read), never around generation or persistence.
    /// Returns whatever status and body the endpoint produced, including
    /// non-200 codes and non-JSON bodies; transport failures propagate.
    pub async fn send(&self, url: &str, payload: &OrderPayload) -> anyhow::Result<SendResult> {
        let start = Instant::now();

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read response body from {}", url))?;

        let elapsed = start.elapsed();

        Ok(SendResult {
            status,
            elapsed,
            body,
        })
    }
}
