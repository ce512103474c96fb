//! Boot orchestration.
//!
//! Runs the whole procedure: submit one creation request, announce the
//! assigned identifiers, then watch the batch until it boots. Faults from
//! either stage are reported and contained rather than propagated, so the
//! caller always receives a terminal [`BootReport`].

use std::io::Write;

use crate::api::{ApiError, ComputeApi, LaunchRequest};
use crate::report::Reporter;
use crate::watch::{BootOutcome, BootWatcher};

/// Terminal result of one boot procedure.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BootReport {
    /// The procedure ran to a terminal outcome, successful or timed out.
    Completed(BootOutcome),
    /// A provider fault ended the procedure early; it has been reported.
    Faulted(ApiError),
}

/// Drives instance creation and the boot watch against a provider.
#[derive(Debug)]
pub struct BootOrchestrator<A> {
    api: A,
    watcher: BootWatcher,
}

impl<A: ComputeApi> BootOrchestrator<A> {
    /// Creates an orchestrator for `api` polling with `watcher`.
    #[must_use]
    pub const fn new(api: A, watcher: BootWatcher) -> Self {
        Self { api, watcher }
    }

    /// Runs the boot procedure to completion.
    ///
    /// Provider faults are written through `reporter` in their category
    /// format and returned as [`BootReport::Faulted`]; they never escape as
    /// errors.
    pub async fn execute<W: Write>(
        &self,
        request: &LaunchRequest,
        reporter: &mut Reporter<W>,
    ) -> BootReport {
        match self.run_to_completion(request, reporter).await {
            Ok(outcome) => BootReport::Completed(outcome),
            Err(error) => {
                reporter.fault(&error);
                BootReport::Faulted(error)
            }
        }
    }

    async fn run_to_completion<W: Write>(
        &self,
        request: &LaunchRequest,
        reporter: &mut Reporter<W>,
    ) -> Result<BootOutcome, ApiError> {
        let instance_ids = self.api.create_instances(request).await?;
        reporter.creation_succeeded(&instance_ids);
        self.watcher.watch(&self.api, instance_ids, reporter).await
    }
}
