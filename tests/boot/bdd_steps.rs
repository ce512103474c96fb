//! BDD step definitions for the boot workflow.

use std::time::Duration;

use rstest_bdd_macros::{given, then, when};
use tokio::runtime::Runtime;
use yunti::{ApiError, BootOrchestrator, BootOutcome, BootReport, BootWatcher, Reporter};

use super::test_helpers::{BootContext, split_ids};

#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error("assertion failed: {0}")]
    Assertion(String),
}

#[given("a provider that assigns instances \"{ids}\"")]
fn provider_assigns(boot_context: BootContext, ids: String) -> BootContext {
    let assigned = split_ids(&ids);
    let assigned_refs: Vec<&str> = assigned.iter().map(String::as_str).collect();
    boot_context.api.push_create_ids(&assigned_refs);
    boot_context
}

#[given("a provider that rejects creation with code \"{code}\" and message \"{message}\"")]
fn provider_rejects_creation(
    boot_context: BootContext,
    code: String,
    message: String,
) -> BootContext {
    boot_context
        .api
        .push_create_fault(ApiError::business(code, message, None));
    boot_context
}

#[given("a status poll reporting \"{running}\" running and \"{starting}\" still starting")]
fn poll_reports_mixed(
    boot_context: BootContext,
    running: String,
    starting: String,
) -> BootContext {
    let mut records: Vec<(String, String)> = Vec::new();
    for id in split_ids(&running) {
        records.push((id, String::from("Running")));
    }
    for id in split_ids(&starting) {
        records.push((id, String::from("Starting")));
    }
    let record_refs: Vec<(&str, &str)> = records
        .iter()
        .map(|(id, status)| (id.as_str(), status.as_str()))
        .collect();
    boot_context.api.push_statuses(&record_refs);
    boot_context
}

#[given("a status poll reporting \"{ids}\" running")]
fn poll_reports_running(boot_context: BootContext, ids: String) -> BootContext {
    let running = split_ids(&ids);
    let record_refs: Vec<(&str, &str)> =
        running.iter().map(|id| (id.as_str(), "Running")).collect();
    boot_context.api.push_statuses(&record_refs);
    boot_context
}

#[given("a status poll that fails to connect with \"{message}\"")]
fn poll_fails_to_connect(boot_context: BootContext, message: String) -> BootContext {
    boot_context
        .api
        .push_describe_fault(ApiError::connection(message));
    boot_context
}

#[given("no time budget for the watch")]
fn no_time_budget(mut boot_context: BootContext) -> BootContext {
    boot_context.poll_timeout = Duration::ZERO;
    boot_context
}

#[when("I run the boot procedure")]
fn run_boot(boot_context: BootContext) -> Result<BootContext, StepError> {
    let runtime = Runtime::new().map_err(|err| StepError::Assertion(err.to_string()))?;
    let BootContext {
        api,
        poll_timeout,
        request,
        ..
    } = boot_context;

    let orchestrator =
        BootOrchestrator::new(api.clone(), BootWatcher::new(Duration::ZERO, poll_timeout));
    let mut reporter = Reporter::new(Vec::new());
    let report = runtime.block_on(orchestrator.execute(&request, &mut reporter));
    let transcript = String::from_utf8(reporter.into_inner())
        .map_err(|err| StepError::Assertion(format!("transcript not UTF-8: {err}")))?;

    Ok(BootContext {
        api,
        poll_timeout,
        request,
        report: Some(report),
        transcript: Some(transcript),
    })
}

fn transcript_of(boot_context: &BootContext) -> Result<&str, StepError> {
    boot_context
        .transcript
        .as_deref()
        .ok_or_else(|| StepError::Assertion(String::from("missing transcript")))
}

#[then("the procedure completes with instances \"{ids}\" booted")]
fn completes_with(boot_context: &BootContext, ids: String) -> Result<(), StepError> {
    let expected = split_ids(&ids);
    match &boot_context.report {
        Some(BootReport::Completed(BootOutcome::AllRunning { booted })) if *booted == expected => {
            Ok(())
        }
        other => Err(StepError::Assertion(format!(
            "expected {expected:?} booted, got {other:?}"
        ))),
    }
}

#[then("the procedure times out with \"{ids}\" still pending")]
fn times_out_with(boot_context: &BootContext, ids: String) -> Result<(), StepError> {
    let expected = split_ids(&ids);
    match &boot_context.report {
        Some(BootReport::Completed(BootOutcome::TimedOut { pending, .. }))
            if *pending == expected =>
        {
            Ok(())
        }
        other => Err(StepError::Assertion(format!(
            "expected timeout with {expected:?} pending, got {other:?}"
        ))),
    }
}

#[then("the procedure reports a contained fault")]
fn reports_contained_fault(boot_context: &BootContext) -> Result<(), StepError> {
    match &boot_context.report {
        Some(BootReport::Faulted(_)) => Ok(()),
        other => Err(StepError::Assertion(format!(
            "expected a contained fault, got {other:?}"
        ))),
    }
}

#[then("no status poll is made")]
fn no_status_poll(boot_context: &BootContext) -> Result<(), StepError> {
    let queries = boot_context.api.describe_queries();
    if queries.is_empty() {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "expected no status polls, saw {queries:?}"
        )))
    }
}

#[then("the transcript announces creation of \"{ids}\"")]
fn announces_creation(boot_context: &BootContext, ids: String) -> Result<(), StepError> {
    let transcript = transcript_of(boot_context)?;
    let line = format!("Success. Instance creation succeed. InstanceIds: {ids}");
    if transcript.lines().next() == Some(line.as_str()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "transcript does not open with {line:?}: {transcript}"
        )))
    }
}

#[then("the transcript announces \"{first}\" booting before \"{second}\"")]
fn boots_in_order(
    boot_context: &BootContext,
    first: String,
    second: String,
) -> Result<(), StepError> {
    let transcript = transcript_of(boot_context)?;
    let first_position = transcript.find(&format!("Instance boot successfully: {first}"));
    let second_position = transcript.find(&format!("Instance boot successfully: {second}"));
    match (first_position, second_position) {
        (Some(earlier), Some(later)) if earlier < later => Ok(()),
        _ => Err(StepError::Assertion(format!(
            "boot lines missing or out of order: {transcript}"
        ))),
    }
}

#[then("the transcript ends with \"{line}\"")]
fn transcript_ends_with(boot_context: &BootContext, line: String) -> Result<(), StepError> {
    let transcript = transcript_of(boot_context)?;
    if transcript.lines().last() == Some(line.as_str()) {
        Ok(())
    } else {
        Err(StepError::Assertion(format!(
            "transcript does not end with {line:?}: {transcript}"
        )))
    }
}
