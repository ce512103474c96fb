//! Command-line interface definitions for the `yunti` binary.
//!
//! This module centralises the clap parser structures so both the main binary
//! and the build script can reuse them when generating the manual page.

use clap::Parser;

/// Top-level CLI for the `yunti` binary.
#[derive(Debug, Parser)]
#[command(
    name = "yunti",
    about = "Provision Alibaba Cloud ECS instances and watch them boot",
    arg_required_else_help = true
)]
pub(crate) enum Cli {
    /// Create instances and watch until they run.
    #[command(
        name = "boot",
        about = "Create ECS instances and watch until they run"
    )]
    Boot(BootCommand),
    /// Show the current status of instances.
    #[command(name = "status", about = "Show the current status of ECS instances")]
    Status(StatusCommand),
}

/// Arguments for the `yunti boot` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct BootCommand {
    /// Override the ECS instance type for this launch.
    ///
    /// The provider validates availability in the selected zone and rejects
    /// unknown or sold-out types with a business fault.
    #[arg(long, value_name = "TYPE")]
    pub(crate) instance_type: Option<String>,
    /// Override the image identifier for this launch.
    #[arg(long, value_name = "IMAGE")]
    pub(crate) image_id: Option<String>,
    /// Override how many instances to create in this batch.
    #[arg(long, value_name = "COUNT")]
    pub(crate) amount: Option<u32>,
    /// Submit the creation request in dry-run mode.
    ///
    /// The provider checks permissions and parameters without creating
    /// anything and answers with a fault either way, so a dry run reports a
    /// business fault on success too.
    #[arg(long)]
    pub(crate) dry_run: bool,
}

/// Arguments for the `yunti status` subcommand.
#[derive(Debug, Parser)]
pub(crate) struct StatusCommand {
    /// Instance identifiers to query.
    #[arg(required = true, value_name = "INSTANCE_ID")]
    pub(crate) instance_ids: Vec<String>,
}
