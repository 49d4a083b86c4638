//! Upstream call failures.

use thiserror::Error;

/// Transport-level failure of an outbound call.
///
/// Non-200 statuses are not errors at this level; they are reported through
/// [`ProbeResult`](super::ProbeResult) and [`ForwardOutcome`](super::ForwardOutcome).
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("failed to connect to {url}: {source}")]
    Connect {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl UpstreamError {
    /// Classify a reqwest failure for `url`.
    pub(crate) fn from_reqwest(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            UpstreamError::Timeout { url }
        } else if source.is_connect() {
            UpstreamError::Connect { url, source }
        } else {
            UpstreamError::Transport { url, source }
        }
    }
}
