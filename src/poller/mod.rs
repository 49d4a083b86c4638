//! Periodic polling subsystem.
//!
//! # Data Flow
//! ```text
//! schedule.rs: PeriodicTask timer
//!     → tick.rs: Poller::tick
//!     → UpstreamClient::probe per target (sequential)
//!     → log each non-empty result, drop everything
//! ```
//!
//! # Design Decisions
//! - Results go nowhere but the log
//! - Failures never stop the schedule
//! - Overlapping ticks are skipped, not queued

pub mod schedule;
pub mod tick;

pub use schedule::{PeriodicTask, TaskHandle, TaskStats};
pub use tick::Poller;
