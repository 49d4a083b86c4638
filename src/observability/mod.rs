//! Observability subsystem.
//!
//! Every subsystem emits `tracing` events with structured fields
//! (`request_id`, `target_name`, `url`, `status`, `error`); logging.rs
//! installs the subscriber that renders them.

pub mod logging;
