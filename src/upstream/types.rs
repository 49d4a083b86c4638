//! Transient results of upstream calls.

use reqwest::StatusCode;
use serde_json::Value;

use crate::upstream::error::UpstreamError;

/// Outcome of probing one poll target during one tick.
///
/// Produced, logged, and dropped. Never retried or cached.
#[derive(Debug)]
pub struct ProbeResult {
    pub name: String,
    pub url: String,
    /// `None` when no HTTP response arrived.
    pub status: Option<StatusCode>,
    /// Present only for a 200 response. Non-JSON bodies are kept as a string.
    pub body: Option<Value>,
}

impl ProbeResult {
    pub fn is_success(&self) -> bool {
        self.body.is_some()
    }
}

/// Result of forwarding one inbound payload.
#[derive(Debug)]
pub enum ForwardOutcome {
    /// Target answered 200.
    Delivered { body: String },
    /// Target answered with any other status.
    Rejected { status: StatusCode, body: String },
    /// No response from the target.
    Failed(UpstreamError),
}
