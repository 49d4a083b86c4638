//! Outbound HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! Poller tick                      /api/receive handler
//!     → UpstreamClient::probe          → UpstreamClient::forward
//!     → GET poll target                → POST forward target
//!     → ProbeResult                    → ForwardOutcome
//! ```
//!
//! # Design Decisions
//! - One `reqwest::Client` shared by both callers
//! - Results are plain values; nothing is cached or retried

pub mod client;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::UpstreamClient;
pub use error::UpstreamError;
pub use types::{ForwardOutcome, ProbeResult};
