//! Worker lifecycle scripts.
//!
//! The scripts run in a fixed order from the repository root, each attached
//! to the operator's terminal. What happens when one fails is a property of
//! the step, not of the loop that runs them.

use std::path::Path;

use tracing::{info, warn};

use crate::config::{InstallMode, InstallerSettings};
use crate::error::{InstallError, Result};
use crate::exec::{CommandRunner, ExecMode, Invocation};
use crate::ui;

/// What a failed step does to the rest of the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the installation.
    Abort,
    /// Print a warning with this reason and carry on.
    Warn(&'static str),
}

/// One script in the sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleStep {
    /// Script file name, relative to the repository root.
    pub script: &'static str,
    pub on_failure: FailurePolicy,
}

/// Build, setup, stop, start. Stopping a worker that never ran is expected
/// to fail on a fresh host, so only that step is tolerated.
pub const LIFECYCLE_STEPS: [LifecycleStep; 4] = [
    LifecycleStep {
        script: "build-worker.sh",
        on_failure: FailurePolicy::Abort,
    },
    LifecycleStep {
        script: "setup-worker.sh",
        on_failure: FailurePolicy::Abort,
    },
    LifecycleStep {
        script: "stop-worker.sh",
        on_failure: FailurePolicy::Warn("worker may not have been running"),
    },
    LifecycleStep {
        script: "start-worker.sh",
        on_failure: FailurePolicy::Abort,
    },
];

/// Outcome of a completed sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LifecycleReport {
    /// Scripts that ran, in order.
    pub completed: Vec<&'static str>,
    /// Scripts that failed under a `Warn` policy.
    pub warnings: Vec<&'static str>,
}

/// Runs the lifecycle scripts.
pub struct Lifecycle<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a InstallerSettings,
    steps: &'a [LifecycleStep],
}

impl<'a> Lifecycle<'a> {
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a InstallerSettings) -> Self {
        Self {
            runner,
            settings,
            steps: &LIFECYCLE_STEPS,
        }
    }

    /// Replace the step table.
    #[must_use]
    pub fn with_steps(mut self, steps: &'a [LifecycleStep]) -> Self {
        self.steps = steps;
        self
    }

    /// Run every step in order under its failure policy.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::ScriptFailed`] for the first `Abort` step that
    /// fails or cannot be started; later steps are not run.
    pub fn run_sequence(&self, repo_path: &Path, mode: InstallMode) -> Result<LifecycleReport> {
        if let Some((key, value)) = mode.stage_env() {
            ui::print_info(&format!("Running in DEV mode ({key}={value})"));
        }

        let mut report = LifecycleReport::default();

        for step in self.steps {
            ui::print_section(&format!("Running {}...", step.script));

            let mut invocation = Invocation::new(&self.settings.script_shell)
                .arg(format!("./{}", step.script))
                .current_dir(repo_path);
            if let Some((key, value)) = mode.stage_env() {
                invocation = invocation.env(key, value);
            }

            let succeeded = match self.runner.run(&invocation, ExecMode::Interactive) {
                Ok(outcome) => outcome.success,
                Err(err) => {
                    warn!(script = step.script, error = %err, "Script could not be started");
                    false
                }
            };

            if succeeded {
                info!(script = step.script, "Lifecycle script finished");
                report.completed.push(step.script);
                continue;
            }

            match step.on_failure {
                FailurePolicy::Abort => {
                    return Err(InstallError::ScriptFailed {
                        script: step.script.to_string(),
                    });
                }
                FailurePolicy::Warn(reason) => {
                    warn!(script = step.script, reason, "Lifecycle script failed, continuing");
                    ui::print_warning(&format!("{} failed ({reason})", step.script));
                    report.completed.push(step.script);
                    report.warnings.push(step.script);
                }
            }
        }

        Ok(report)
    }
}
