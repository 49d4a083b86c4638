//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Periodic polling of upstream targets.
    pub poller: PollerConfig,

    /// Destination for payloads received on `/api/receive`.
    pub forward: ForwardConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:5000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
        }
    }
}

/// Poller configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct PollerConfig {
    /// Enable the periodic poller.
    pub enabled: bool,

    /// Seconds between ticks.
    pub interval_secs: u64,

    /// Run the first tick immediately instead of after one interval.
    pub poll_on_start: bool,

    /// Targets probed on every tick, in order.
    pub targets: Vec<PollTarget>,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 60,
            poll_on_start: false,
            targets: vec![
                PollTarget::new("Service 1", DEFAULT_SERVICE_1_URL),
                PollTarget::new("Service 2", DEFAULT_SERVICE_2_URL),
            ],
        }
    }
}

const DEFAULT_SERVICE_1_URL: &str = "https://example.com/api/service1";
const DEFAULT_SERVICE_2_URL: &str = "https://example.com/api/service2";

/// A named upstream URL probed by the poller.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PollTarget {
    /// Human-readable label used in logs.
    pub name: String,

    /// Absolute http(s) URL.
    pub url: String,
}

impl PollTarget {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Forwarding configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ForwardConfig {
    /// URL that receives inbound payloads via POST.
    pub target_url: String,
}

impl Default for ForwardConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_SERVICE_1_URL.to_string(),
        }
    }
}

/// Timeout configuration for inbound and outbound traffic.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Inbound request timeout in seconds.
    pub request_secs: u64,

    /// Total time allowed for one outbound call in seconds.
    pub upstream_secs: u64,

    /// Outbound connection establishment timeout in seconds.
    pub connect_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 30,
            upstream_secs: 10,
            connect_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// Log line rendering.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}
