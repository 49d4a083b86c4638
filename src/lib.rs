//! Relay service library.
//!
//! Polls configured upstream services on a fixed interval and relays JSON
//! payloads received on `POST /api/receive` to a target service.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod poller;
pub mod upstream;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::{Relay, Shutdown};
