//! HTTP client for poll targets and the forward target.
//!
//! # Responsibilities
//! - Send GET probes and classify the result
//! - Send POST forwards and classify the result
//! - Bound every call with the configured timeouts
//!
//! # Design Decisions
//! - No retries; every failure is logged once and reported to the caller
//! - Only status 200 counts as success; other 2xx codes are failures
//! - Nothing here returns `Err` for a failed call; failures are values

use std::time::Duration;

use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::{PollTarget, TimeoutConfig};
use crate::upstream::error::UpstreamError;
use crate::upstream::types::{ForwardOutcome, ProbeResult};

/// Shared outbound client. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
}

impl UpstreamClient {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, UpstreamError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeouts.upstream_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self { client })
    }

    /// GET the target and keep its body only if it answered 200.
    pub async fn probe(&self, target: &PollTarget) -> ProbeResult {
        let mut result = ProbeResult {
            name: target.name.clone(),
            url: target.url.clone(),
            status: None,
            body: None,
        };

        tracing::info!(target_name = %target.name, url = %target.url, "Sending request");

        let response = match self.client.get(&target.url).send().await {
            Ok(response) => response,
            Err(e) => {
                let error = UpstreamError::from_reqwest(&target.url, e);
                tracing::error!(target_name = %target.name, error = %error, "Request failed");
                return result;
            }
        };

        let status = response.status();
        result.status = Some(status);

        if status != StatusCode::OK {
            tracing::error!(target_name = %target.name, status = %status, "Request failed: non-200 status");
            return result;
        }

        match response.text().await {
            Ok(text) => {
                tracing::info!(target_name = %target.name, body = %text, "Success response");
                result.body = Some(serde_json::from_str(&text).unwrap_or(Value::String(text)));
            }
            Err(e) => {
                let error = UpstreamError::from_reqwest(&target.url, e);
                tracing::error!(target_name = %target.name, error = %error, "Failed to read response body");
            }
        }

        result
    }

    /// POST `payload` to `url` exactly as given.
    pub async fn forward(&self, url: &str, payload: Bytes) -> ForwardOutcome {
        let sent = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await;

        let response = match sent {
            Ok(response) => response,
            Err(e) => return ForwardOutcome::Failed(UpstreamError::from_reqwest(url, e)),
        };

        let status = response.status();
        // The body is diagnostic only; an unreadable body does not change the outcome.
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::OK {
            ForwardOutcome::Delivered { body }
        } else {
            ForwardOutcome::Rejected { status, body }
        }
    }
}
