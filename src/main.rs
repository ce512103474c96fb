//! Binary entry point for the yunti CLI.

use std::io::{self, Write};
use std::process;

use clap::Parser;
use thiserror::Error;

use yunti::{BootOrchestrator, BootWatcher, ComputeApi, EcsClient, EcsConfig, Reporter};

mod cli;

use cli::{BootCommand, Cli, StatusCommand};

#[derive(Debug, Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("status query failed: {0}")]
    Status(String),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let exit_code = match dispatch(cli).await {
        Ok(code) => code,
        Err(err) => {
            report_error(&err);
            1
        }
    };

    process::exit(exit_code);
}

async fn dispatch(cli: Cli) -> Result<i32, CliError> {
    match cli {
        Cli::Boot(command) => boot_command(command).await,
        Cli::Status(command) => status_command(command).await,
    }
}

/// Runs the boot procedure end to end.
///
/// Provider faults are reported on stdout by the orchestrator and the
/// command still exits zero; only configuration problems fail it.
async fn boot_command(args: BootCommand) -> Result<i32, CliError> {
    let mut config =
        EcsConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    apply_overrides(&mut config, &args);

    // Credentials first, so a bare environment is told about keys before
    // launch options.
    let client = EcsClient::new(&config).map_err(|err| CliError::Config(err.to_string()))?;
    let request = config
        .as_request()
        .map_err(|err| CliError::Config(err.to_string()))?;
    let watcher = BootWatcher::new(config.poll_interval(), config.poll_timeout());
    let orchestrator = BootOrchestrator::new(client, watcher);
    let mut reporter = Reporter::new(io::stdout());

    orchestrator.execute(&request, &mut reporter).await;
    Ok(0)
}

async fn status_command(args: StatusCommand) -> Result<i32, CliError> {
    let config =
        EcsConfig::load_without_cli_args().map_err(|err| CliError::Config(err.to_string()))?;
    let client = EcsClient::new(&config).map_err(|err| CliError::Config(err.to_string()))?;

    let statuses = client
        .describe_instances(&args.instance_ids)
        .await
        .map_err(|err| CliError::Status(err.to_string()))?;

    let mut reporter = Reporter::new(io::stdout());
    for status in &statuses {
        reporter.instance_state(status);
    }
    Ok(0)
}

fn apply_overrides(config: &mut EcsConfig, args: &BootCommand) {
    if let Some(instance_type) = &args.instance_type {
        config.instance_type = instance_type.clone();
    }
    if let Some(image_id) = &args.image_id {
        config.image_id = image_id.clone();
    }
    if let Some(amount) = args.amount {
        config.amount = amount;
    }
    if args.dry_run {
        config.dry_run = true;
    }
}

fn report_error(err: &CliError) {
    write_error(io::stderr(), err);
}

fn write_error(mut target: impl Write, err: &CliError) {
    writeln!(target, "{err}").ok();
}
