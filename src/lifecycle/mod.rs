//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Validated config → Relay (client, poller, server) → bind → run
//!
//! Shutdown (shutdown.rs):
//!     Trigger → server stops accepting → poller stops after in-flight tick
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → trigger shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{Relay, RelayError};
