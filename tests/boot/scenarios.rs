//! BDD scenarios for the boot workflow.

use rstest_bdd_macros::scenario;

use super::test_helpers::{BootContext, boot_context};

#[scenario(
    path = "tests/features/boot.feature",
    name = "Report every stage of a successful boot"
)]
fn scenario_successful_boot(boot_context: BootContext) {
    let _ = boot_context;
}

#[scenario(
    path = "tests/features/boot.feature",
    name = "List stragglers when the deadline passes"
)]
fn scenario_deadline_passes(boot_context: BootContext) {
    let _ = boot_context;
}

#[scenario(
    path = "tests/features/boot.feature",
    name = "Contain a business fault from creation"
)]
fn scenario_creation_fault(boot_context: BootContext) {
    let _ = boot_context;
}

#[scenario(
    path = "tests/features/boot.feature",
    name = "Contain a connection fault from polling"
)]
fn scenario_polling_fault(boot_context: BootContext) {
    let _ = boot_context;
}
