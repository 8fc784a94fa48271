use tracing::{info, warn};

use crate::config::InstallerSettings;
use crate::exec::{CommandRunner, ExecMode, Invocation};
use crate::ui;

/// Confirms the container runtime is installed and its daemon reachable.
pub struct RuntimeChecker<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a InstallerSettings,
}

impl<'a> RuntimeChecker<'a> {
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a InstallerSettings) -> Self {
        Self { runner, settings }
    }

    /// Two-stage check: `<runtime> --version`, then `<runtime> ps`.
    ///
    /// Stops at the first failing stage, prints what failed and how to fix it,
    /// and returns `false`. Aborting is left to the caller.
    pub fn check_runtime_available(&self) -> bool {
        let name = &self.settings.runtime_name;
        ui::print_step(&format!("Checking for {name} installation..."));

        let version = Invocation::new(&self.settings.runtime_program).arg("--version");
        match self.runner.run(&version, ExecMode::Captured) {
            Ok(outcome) if outcome.success => {
                info!(version = %outcome.stdout, "Container runtime found");
                ui::print_success(&format!("{name} found: {}", outcome.stdout));
            }
            result => {
                warn!(command = %version.display(), ?result, "Version query failed");
                ui::print_error(&format!("{name} is not installed or not in PATH."));
                ui::print_info(&format!(
                    "Please install {name} from {}",
                    self.settings.runtime_install_url
                ));
                return false;
            }
        }

        let status = Invocation::new(&self.settings.runtime_program).arg("ps");
        match self.runner.run(&status, ExecMode::Captured) {
            Ok(outcome) if outcome.success => {
                ui::print_success(&format!("{name} CLI is accessible"));
                true
            }
            result => {
                warn!(command = %status.display(), ?result, "Runtime status query failed");
                ui::print_error(&format!("{name} CLI is not accessible."));
                ui::print_info(&format!(
                    "Make sure the {name} daemon is running and you have proper permissions."
                ));
                false
            }
        }
    }
}
