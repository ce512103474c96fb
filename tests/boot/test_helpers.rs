//! Shared fixtures for boot BDD scenarios.

use std::time::Duration;

use rstest::fixture;
use yunti::test_support::{ScriptedApi, sample_config};
use yunti::{BootReport, LaunchRequest};

/// Context threaded through the boot scenarios.
#[derive(Clone, Debug)]
pub struct BootContext {
    pub api: ScriptedApi,
    pub poll_timeout: Duration,
    pub request: LaunchRequest,
    pub report: Option<BootReport>,
    pub transcript: Option<String>,
}

#[fixture]
pub fn boot_context() -> BootContext {
    BootContext {
        api: ScriptedApi::new(),
        poll_timeout: Duration::from_secs(180),
        request: sample_config()
            .as_request()
            .unwrap_or_else(|err| panic!("launch request fixture should be valid: {err}")),
        report: None,
        transcript: None,
    }
}

/// Splits a comma-separated scenario argument into identifiers.
pub fn split_ids(list: &str) -> Vec<String> {
    list.split(',').map(|id| id.trim().to_owned()).collect()
}
