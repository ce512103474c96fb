//! Progress and fault reporting for the boot procedure.
//!
//! Every outcome is a fixed line written to the reporter's target. Callers
//! that script the procedure in tests hand in a buffer instead of stdout and
//! assert on the transcript.

use std::io::Write;
use std::time::Duration;

use crate::api::{ApiError, InstanceStatus};

/// Writes procedure progress lines to `target`.
///
/// Write failures are swallowed: reporting must never abort the procedure.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    target: W,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter writing to `target`.
    #[must_use]
    pub const fn new(target: W) -> Self {
        Self { target }
    }

    /// Consumes the reporter and returns its target.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.target
    }

    /// Announces a successful creation request with the assigned identifiers.
    pub fn creation_succeeded(&mut self, instance_ids: &[String]) {
        writeln!(
            self.target,
            "Success. Instance creation succeed. InstanceIds: {}",
            instance_ids.join(", ")
        )
        .ok();
    }

    /// Announces one instance reaching the running state.
    pub fn instance_running(&mut self, instance_id: &str) {
        writeln!(self.target, "Instance boot successfully: {instance_id}").ok();
    }

    /// Announces that every requested instance is running.
    pub fn all_running(&mut self) {
        writeln!(self.target, "Instances all boot successfully").ok();
    }

    /// Announces the instances still pending when the deadline passed.
    pub fn boot_timeout(&mut self, timeout: Duration, pending: &[String]) {
        writeln!(
            self.target,
            "Instances boot failed within {}s: {}",
            timeout.as_secs(),
            pending.join(", ")
        )
        .ok();
    }

    /// Reports a fault in the category-specific format.
    pub fn fault(&mut self, error: &ApiError) {
        match error {
            ApiError::Connection { code, message } => {
                writeln!(
                    self.target,
                    "Fail. Something with your connection with Aliyun go incorrect. \
                     Code: {code}, Message: {message}"
                )
                .ok();
            }
            ApiError::Business { code, message, .. } => {
                writeln!(
                    self.target,
                    "Fail. Business error. Code: {code}, Message: {message}"
                )
                .ok();
            }
            ApiError::Unexpected { message } => {
                writeln!(self.target, "Unhandled error").ok();
                writeln!(self.target, "{message}").ok();
            }
        }
    }

    /// Prints one instance identifier and its reported status.
    pub fn instance_state(&mut self, status: &InstanceStatus) {
        writeln!(self.target, "{}\t{}", status.id, status.status).ok();
    }
}
