//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (intervals and timeouts > 0, known log level)
//! - Outbound calls must give up before the inbound request times out
//! - Check that every URL is an absolute http(s) URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("{field} `{value}` is not an absolute http(s) URL")]
    Url { field: String, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("timeouts.upstream_secs ({upstream}) must be less than timeouts.request_secs ({request})")]
    TimeoutOrder { upstream: u64, request: u64 },

    #[error("poller.targets[{0}].name must not be empty")]
    EmptyTargetName(usize),

    #[error("poller is enabled but has no targets")]
    NoTargets,

    #[error("observability.log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    check_url("forward.target_url", &config.forward.target_url, &mut errors);

    if config.poller.interval_secs == 0 {
        errors.push(ValidationError::Zero("poller.interval_secs"));
    }
    if config.poller.enabled && config.poller.targets.is_empty() {
        errors.push(ValidationError::NoTargets);
    }
    for (i, target) in config.poller.targets.iter().enumerate() {
        if target.name.trim().is_empty() {
            errors.push(ValidationError::EmptyTargetName(i));
        }
        check_url(&format!("poller.targets[{}].url", i), &target.url, &mut errors);
    }

    let timeouts = [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("timeouts.upstream_secs", config.timeouts.upstream_secs),
        ("timeouts.connect_secs", config.timeouts.connect_secs),
    ];
    for (field, value) in timeouts {
        if value == 0 {
            errors.push(ValidationError::Zero(field));
        }
    }
    // Otherwise the inbound timeout answers 408 before the forward fails.
    if config.timeouts.upstream_secs >= config.timeouts.request_secs {
        errors.push(ValidationError::TimeoutOrder {
            upstream: config.timeouts.upstream_secs,
            request: config.timeouts.request_secs,
        });
    }

    if config
        .observability
        .log_level
        .parse::<tracing::Level>()
        .is_err()
    {
        errors.push(ValidationError::LogLevel(
            config.observability.log_level.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);

    if !valid {
        errors.push(ValidationError::Url {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::PollTarget;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&RelayConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = RelayConfig::default();
        config.listener.bind_address = "localhost".into();
        config.forward.target_url = "ftp://example.com/drop".into();
        config.poller.interval_secs = 0;
        config.timeouts.upstream_secs = 0;
        config.poller.targets = vec![PollTarget::new(" ", "not a url")];
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::Url {
                    field: "forward.target_url".into(),
                    value: "ftp://example.com/drop".into(),
                },
                ValidationError::Zero("poller.interval_secs"),
                ValidationError::EmptyTargetName(0),
                ValidationError::Url {
                    field: "poller.targets[0].url".into(),
                    value: "not a url".into(),
                },
                ValidationError::Zero("timeouts.upstream_secs"),
                ValidationError::LogLevel("loud".into()),
            ]
        );
    }

    #[test]
    fn upstream_timeout_must_be_shorter_than_request_timeout() {
        let mut config = RelayConfig::default();
        config.timeouts.request_secs = 1;
        config.timeouts.upstream_secs = 5;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::TimeoutOrder {
                upstream: 5,
                request: 1,
            }])
        );

        config.timeouts.upstream_secs = 1;
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::TimeoutOrder {
                upstream: 1,
                request: 1,
            }])
        );

        config.timeouts.request_secs = 2;
        assert_eq!(validate_config(&config), Ok(()));
    }

    #[test]
    fn disabled_poller_may_have_no_targets() {
        let mut config = RelayConfig::default();
        config.poller.targets.clear();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::NoTargets])
        );

        config.poller.enabled = false;
        assert_eq!(validate_config(&config), Ok(()));
    }
}
