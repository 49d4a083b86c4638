//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the shared upstream client from validated configuration
//! - Bind the listener
//! - Start the poller, serve HTTP, stop the poller once serving ends
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - One `Relay` value owns everything; there is no global state

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{validate_config, ConfigError, RelayConfig};
use crate::http::{build_router, AppState, HttpServer};
use crate::lifecycle::shutdown::ShutdownSignal;
use crate::poller::Poller;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Errors that stop the process.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// The running service: poller plus relay endpoint.
pub struct Relay {
    config: RelayConfig,
    client: UpstreamClient,
}

impl Relay {
    pub fn new(config: RelayConfig) -> Result<Self, RelayError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let client = UpstreamClient::new(&config.timeouts)?;
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    fn app_state(&self) -> AppState {
        AppState::new(self.client.clone(), self.config.forward.target_url.as_str())
    }

    /// The HTTP routes, without binding anything.
    pub fn router(&self) -> Router {
        build_router(self.app_state(), &self.config.timeouts)
    }

    /// The poller, or `None` when polling is disabled.
    pub fn poller(&self) -> Option<Poller> {
        self.config
            .poller
            .enabled
            .then(|| Poller::new(self.client.clone(), self.config.poller.targets.clone()))
    }

    /// Bind the configured listen address.
    pub async fn bind(&self) -> Result<TcpListener, RelayError> {
        let address = &self.config.listener.bind_address;
        TcpListener::bind(address)
            .await
            .map_err(|source| RelayError::Bind {
                address: address.clone(),
                source,
            })
    }

    /// Serve on `listener` until `shutdown` fires.
    ///
    /// The poller runs alongside the server and is stopped after it.
    pub async fn run(self, listener: TcpListener, shutdown: ShutdownSignal) -> Result<(), RelayError> {
        let poller = match self.poller() {
            Some(poller) => Some(Arc::new(poller).start(&self.config.poller)),
            None => {
                tracing::info!("Poller disabled");
                None
            }
        };

        let server = HttpServer::new(self.app_state(), &self.config.timeouts);
        let served = server.run(listener, shutdown).await;

        if let Some(handle) = poller {
            handle.stop();
            let stats = handle.join().await;
            tracing::info!(runs = stats.runs, skipped = stats.skipped, "Poller stopped");
        }

        served.map_err(RelayError::Serve)
    }
}
