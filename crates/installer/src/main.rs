//! Media Library Source Worker installer CLI.
//!
//! Clones the worker, checks Docker, configures library paths and brings the
//! worker up with its own scripts.

use std::process::ExitCode;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use media_worker_installer::{ui, InstallMode, Installer, SystemRunner, TerminalPrompter};

/// Install and configure the Media Library Source Worker.
#[derive(Parser, Debug)]
#[command(
    name = "media-worker-install",
    version,
    about = "Install and configure Media Library Source Worker",
    long_about = "Install and configure the Media Library Source Worker.\n\n\
                  Clones the worker repository, checks for Docker, writes your\n\
                  library paths into the worker config and starts the worker.\n\n\
                  Re-running is safe: any previous clone is replaced."
)]
struct Cli {
    /// Run in development mode (uses dev.json and STAGE=dev).
    #[arg(long)]
    dev: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing; stderr keeps log lines out of the prompts
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,media_worker_installer=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            ui::print_error(&failure_message(&err));
            ExitCode::FAILURE
        }
    }
}

/// Installer errors already carry their cause in their message.
fn failure_message(err: &anyhow::Error) -> String {
    err.to_string()
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir()
        .map_err(|err| anyhow!("Failed to determine current directory: {err}"))?;
    let prompter = TerminalPrompter::new();

    Installer::new(&SystemRunner, &prompter, InstallMode::from_dev_flag(cli.dev), cwd).run()?;
    Ok(())
}
