//! Periodic task runner.
//!
//! # Responsibilities
//! - Run one async job per period until stopped
//! - Never overlap runs of the same job
//!
//! # Overlap Policy
//! A run is awaited inline. Ticks that fall due while it is still running are
//! skipped, not queued; the next run happens on the first period boundary
//! after the slow run finishes.
//!
//! ```text
//! period:   |0        |100      |200      |300      |
//! runs:     [run 1 -------------------]   [run 2 ...
//!                      skip      skip
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::lifecycle::shutdown::{Shutdown, ShutdownSignal};

/// Counters reported when a task stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub runs: u64,
    pub skipped: u64,
}

/// A named job scheduled at a fixed period.
pub struct PeriodicTask {
    name: String,
    period: Duration,
    run_immediately: bool,
}

impl PeriodicTask {
    /// # Panics
    ///
    /// Panics if `period` is zero.
    pub fn new(name: impl Into<String>, period: Duration) -> Self {
        assert!(!period.is_zero(), "periodic task period must be non-zero");
        Self {
            name: name.into(),
            period,
            run_immediately: false,
        }
    }

    /// Run the first time at start instead of one period after it.
    pub fn run_immediately(mut self, run_immediately: bool) -> Self {
        self.run_immediately = run_immediately;
        self
    }

    /// Spawn the runner on the current Tokio runtime.
    pub fn start<F, Fut>(self, job: F) -> TaskHandle
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let shutdown = Shutdown::new();
        let signal = shutdown.subscribe();
        let name = self.name.clone();
        let join = tokio::spawn(self.run(job, signal));

        TaskHandle {
            name,
            shutdown,
            join,
        }
    }

    async fn run<F, Fut>(self, mut job: F, signal: ShutdownSignal) -> TaskStats
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let first = if self.run_immediately {
            Instant::now()
        } else {
            Instant::now() + self.period
        };
        let mut ticker = time::interval_at(first, self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let stop = signal.recv();
        tokio::pin!(stop);

        tracing::info!(
            task = %self.name,
            period_ms = self.period.as_millis() as u64,
            run_immediately = self.run_immediately,
            "Periodic task starting"
        );

        let mut stats = TaskStats::default();
        loop {
            let scheduled = tokio::select! {
                biased;
                _ = &mut stop => break,
                scheduled = ticker.tick() => scheduled,
            };

            job().await;
            stats.runs += 1;

            let now = Instant::now();
            let mut next = scheduled + self.period;
            let mut missed = 0;
            while next < now {
                next += self.period;
                missed += 1;
            }
            if missed > 0 {
                stats.skipped += missed;
                ticker.reset_at(next);
                tracing::warn!(
                    task = %self.name,
                    elapsed_ms = (now - scheduled).as_millis() as u64,
                    missed,
                    "Run overran its period, skipping missed ticks"
                );
            }
        }

        tracing::info!(task = %self.name, runs = stats.runs, skipped = stats.skipped, "Periodic task stopped");
        stats
    }
}

/// Control handle for a running [`PeriodicTask`].
///
/// Dropping the handle stops the task after any in-flight run.
pub struct TaskHandle {
    name: String,
    shutdown: Shutdown,
    join: JoinHandle<TaskStats>,
}

impl TaskHandle {
    /// Ask the task to stop. An in-flight run completes first.
    pub fn stop(&self) {
        self.shutdown.trigger();
    }

    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Wait for the task to exit. Call [`stop`](Self::stop) first.
    pub async fn join(self) -> TaskStats {
        let TaskHandle {
            name,
            shutdown: _shutdown,
            join,
        } = self;

        match join.await {
            Ok(stats) => stats,
            Err(e) => {
                tracing::error!(task = %name, error = %e, "Periodic task aborted");
                TaskStats::default()
            }
        }
    }
}
