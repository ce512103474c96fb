//! Boot progress watcher.
//!
//! Polls the provider at a fixed interval until every created instance
//! reports a running status or the deadline passes.

use std::io::Write;
use std::time::{Duration, Instant};

use crate::api::{ApiError, ComputeApi};
use crate::report::Reporter;

/// Marker looked for in a reported status.
///
/// Matching is by substring, so compound states such as `PreRunning` also
/// count as running.
pub const RUNNING_STATUS: &str = "Running";

/// Terminal state of one watch run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BootOutcome {
    /// Every instance reported a running status before the deadline.
    AllRunning {
        /// Identifiers in the order they were observed running.
        booted: Vec<String>,
    },
    /// The deadline passed with instances still pending.
    TimedOut {
        /// Identifiers observed running before the deadline.
        booted: Vec<String>,
        /// Identifiers never observed running.
        pending: Vec<String>,
    },
}

/// Polls instance status until all run or the deadline passes.
#[derive(Clone, Copy, Debug)]
pub struct BootWatcher {
    poll_interval: Duration,
    poll_timeout: Duration,
}

impl BootWatcher {
    /// Creates a watcher polling every `poll_interval` with an overall
    /// `poll_timeout` deadline.
    #[must_use]
    pub const fn new(poll_interval: Duration, poll_timeout: Duration) -> Self {
        Self {
            poll_interval,
            poll_timeout,
        }
    }

    /// Watches `instance_ids` until all report running or the deadline
    /// passes, reporting each transition as it is observed.
    ///
    /// Instances leave the pending set once seen running and are never
    /// re-queried, so the set only shrinks. Records for unknown identifiers
    /// and repeat mentions of an already-booted instance are ignored.
    ///
    /// # Errors
    ///
    /// Propagates the first [`ApiError`] raised by a status query.
    pub async fn watch<A, W>(
        &self,
        api: &A,
        instance_ids: Vec<String>,
        reporter: &mut Reporter<W>,
    ) -> Result<BootOutcome, ApiError>
    where
        A: ComputeApi,
        W: Write,
    {
        let started = Instant::now();
        let mut pending = instance_ids;
        let mut booted = Vec::with_capacity(pending.len());

        if pending.is_empty() {
            reporter.all_running();
            return Ok(BootOutcome::AllRunning { booted });
        }

        loop {
            let observed = api.describe_instances(&pending).await?;
            for status in observed {
                if status.status.contains(RUNNING_STATUS)
                    && let Some(position) = pending.iter().position(|id| *id == status.id)
                {
                    pending.remove(position);
                    reporter.instance_running(&status.id);
                    booted.push(status.id);
                }
            }

            if pending.is_empty() {
                reporter.all_running();
                return Ok(BootOutcome::AllRunning { booted });
            }
            if started.elapsed() > self.poll_timeout {
                reporter.boot_timeout(self.poll_timeout, &pending);
                return Ok(BootOutcome::TimedOut { booted, pending });
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
