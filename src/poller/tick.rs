//! One poll tick over every configured target.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{PollTarget, PollerConfig};
use crate::poller::schedule::{PeriodicTask, TaskHandle};
use crate::upstream::{ProbeResult, UpstreamClient};

/// Probes the configured targets and logs what they return.
pub struct Poller {
    client: UpstreamClient,
    targets: Vec<PollTarget>,
}

impl Poller {
    pub fn new(client: UpstreamClient, targets: Vec<PollTarget>) -> Self {
        Self { client, targets }
    }

    pub fn targets(&self) -> &[PollTarget] {
        &self.targets
    }

    /// Probe every target in order.
    ///
    /// A failing target is logged by the client and does not affect the
    /// others. The results are returned for inspection only.
    pub async fn tick(&self) -> Vec<ProbeResult> {
        tracing::info!(targets = self.targets.len(), "Poll tick started");

        let mut results = Vec::with_capacity(self.targets.len());
        for target in &self.targets {
            results.push(self.client.probe(target).await);
        }

        for result in &results {
            if let Some(body) = &result.body {
                tracing::info!(target_name = %result.name, data = %body, "Data received");
            }
        }

        let failed = results.iter().filter(|r| !r.is_success()).count();
        tracing::info!(failed, "Poll tick finished");
        results
    }

    /// Run [`tick`](Self::tick) on the schedule described by `config`.
    pub fn start(self: Arc<Self>, config: &PollerConfig) -> TaskHandle {
        PeriodicTask::new("poller", Duration::from_secs(config.interval_secs))
            .run_immediately(config.poll_on_start)
            .start(move || {
                let poller = self.clone();
                async move {
                    poller.tick().await;
                }
            })
    }
}
