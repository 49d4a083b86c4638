//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (schema.rs)
//!     → config file, TOML (loader.rs)
//!     → CLI flags / RELAY_* env vars (cli.rs)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → handed to the Relay at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod cli;
pub mod loader;
pub mod schema;
pub mod validation;

pub use cli::Cli;
pub use loader::{load_config, ConfigError};
pub use schema::{
    ForwardConfig, ListenerConfig, LogFormat, ObservabilityConfig, PollTarget, PollerConfig,
    RelayConfig, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
