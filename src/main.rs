//! Relay service.
//!
//! Polls upstream services and relays inbound JSON payloads.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌───────────────────────────────────────────────┐
//!                       │                 RELAY SERVICE                 │
//!                       │                                               │
//!   POST /api/receive   │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ────────────────────┼─▶│  http   │──▶│  relay   │──▶│  upstream  │──┼──▶ Forward
//!   ◀───────────────────┼──│ server  │◀──│ handler  │◀──│   client   │◀─┼─── target
//!                       │  └─────────┘   └──────────┘   └────────────┘  │
//!                       │                                     ▲         │
//!                       │  ┌──────────┐   ┌──────────┐        │         │
//!                       │  │ periodic │──▶│  poller  │────────┘─────────┼──▶ Poll
//!                       │  │   task   │   │   tick   │                  │    targets
//!                       │  └──────────┘   └──────────┘                  │
//!                       │                                               │
//!                       │  config · lifecycle · observability           │
//!                       └───────────────────────────────────────────────┘
//! ```

use clap::Parser;

use relay_service::config::Cli;
use relay_service::lifecycle::{signals, Relay, Shutdown};
use relay_service::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.load()?;

    logging::init(&config.observability)?;

    tracing::info!("relay-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        forward_url = %config.forward.target_url,
        poller_enabled = config.poller.enabled,
        poll_interval_secs = config.poller.interval_secs,
        poll_targets = config.poller.targets.len(),
        "Configuration loaded"
    );

    let relay = Relay::new(config)?;
    let listener = relay.bind().await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown));

    relay.run(listener, signal).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
