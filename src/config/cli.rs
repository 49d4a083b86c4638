//! Command-line and environment overrides.
//!
//! Precedence: built-in defaults, then the TOML file, then these flags
//! (each flag can also be supplied through its `RELAY_*` variable).

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{read_config, ConfigError};
use crate::config::schema::{LogFormat, PollTarget, RelayConfig};
use crate::config::validation::validate_config;

#[derive(Debug, Parser)]
#[command(name = "relay-service")]
#[command(about = "Polls upstream services and relays JSON payloads to a target service", long_about = None)]
pub struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "RELAY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on, e.g. 0.0.0.0:5000.
    #[arg(long, env = "RELAY_BIND")]
    pub bind: Option<String>,

    /// Port to listen on; replaces the port of the bind address.
    #[arg(short, long, env = "RELAY_PORT")]
    pub port: Option<u16>,

    /// Seconds between poll ticks.
    #[arg(long, env = "RELAY_POLL_INTERVAL_SECS")]
    pub poll_interval_secs: Option<u64>,

    /// Poll target as NAME=URL; repeat to replace the configured list.
    #[arg(long = "poll-target", value_parser = parse_poll_target)]
    pub poll_targets: Vec<PollTarget>,

    /// Disable the periodic poller.
    #[arg(long)]
    pub no_poller: bool,

    /// URL that receives payloads posted to /api/receive.
    #[arg(long, env = "RELAY_FORWARD_URL")]
    pub forward_url: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "RELAY_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long, env = "RELAY_LOG_FORMAT", value_enum)]
    pub log_format: Option<LogFormat>,
}

fn parse_poll_target(value: &str) -> Result<PollTarget, String> {
    match value.split_once('=') {
        Some((name, url)) if !name.trim().is_empty() => Ok(PollTarget::new(name.trim(), url)),
        _ => Err(format!("expected NAME=URL, got `{}`", value)),
    }
}

impl Cli {
    /// Build the effective configuration: file (or defaults), then overrides,
    /// then validation.
    pub fn load(&self) -> Result<RelayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => RelayConfig::default(),
        };
        self.apply(&mut config);
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }

    /// Apply every flag that was given to `config`.
    pub fn apply(&self, config: &mut RelayConfig) {
        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(port) = self.port {
            config.listener.bind_address = match config.listener.bind_address.parse::<SocketAddr>() {
                Ok(mut addr) => {
                    addr.set_port(port);
                    addr.to_string()
                }
                Err(_) => format!("0.0.0.0:{}", port),
            };
        }
        if let Some(secs) = self.poll_interval_secs {
            config.poller.interval_secs = secs;
        }
        if !self.poll_targets.is_empty() {
            config.poller.targets = self.poll_targets.clone();
        }
        if self.no_poller {
            config.poller.enabled = false;
        }
        if let Some(url) = &self.forward_url {
            config.forward.target_url = url.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
    }
}
