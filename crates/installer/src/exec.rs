//! External command execution.
//!
//! A single entry point runs a program either captured (output collected,
//! no terminal) or interactive (stdio inherited from the operator's terminal).
//! A non-zero exit is returned as data so each caller picks its own policy.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{InstallError, Result};

/// How a command is attached to the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecMode {
    /// Capture stdout and stderr; the operator sees nothing.
    Captured,
    /// Inherit stdin/stdout/stderr so the command can prompt or stream.
    Interactive,
}

/// A program, its arguments, and where and how to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.cwd = Some(dir.to_path_buf());
        self
    }

    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Command line as the operator would type it.
    #[must_use]
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of one finished command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutcome {
    /// Exit status was zero.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
    /// Trimmed stdout. Always empty for interactive runs.
    pub stdout: String,
    /// Trimmed stderr. Always empty for interactive runs.
    pub stderr: String,
}

impl CommandOutcome {
    /// Most useful text to show when the command failed.
    #[must_use]
    pub fn failure_detail(&self) -> String {
        if !self.stderr.is_empty() {
            self.stderr.clone()
        } else if !self.stdout.is_empty() {
            self.stdout.clone()
        } else {
            match self.code {
                Some(code) => format!("exit status {code}"),
                None => "terminated by signal".to_string(),
            }
        }
    }
}

/// Runs external commands.
///
/// Returns `Err` only when the program could not be started at all; a process
/// that ran and exited non-zero is an `Ok` outcome with `success == false`.
pub trait CommandRunner {
    /// # Errors
    ///
    /// Returns [`InstallError::Spawn`] if the program cannot be started.
    fn run(&self, invocation: &Invocation, mode: ExecMode) -> Result<CommandOutcome>;
}

/// Runs commands as real OS processes. Blocks until the child exits.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation, mode: ExecMode) -> Result<CommandOutcome> {
        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(dir) = &invocation.cwd {
            command.current_dir(dir);
        }
        command.envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));

        debug!(command = %invocation.display(), ?mode, cwd = ?invocation.cwd, "Running command");

        let spawn_err = |source| InstallError::Spawn {
            program: invocation.program.clone(),
            source,
        };

        let outcome = match mode {
            ExecMode::Captured => {
                let output = command
                    .stdin(Stdio::null())
                    .stdout(Stdio::piped())
                    .stderr(Stdio::piped())
                    .output()
                    .map_err(spawn_err)?;
                CommandOutcome {
                    success: output.status.success(),
                    code: output.status.code(),
                    stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
                    stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
                }
            }
            ExecMode::Interactive => {
                let status = command
                    .stdin(Stdio::inherit())
                    .stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .status()
                    .map_err(spawn_err)?;
                CommandOutcome {
                    success: status.success(),
                    code: status.code(),
                    ..CommandOutcome::default()
                }
            }
        };

        debug!(command = %invocation.display(), success = outcome.success, code = ?outcome.code, "Command finished");
        Ok(outcome)
    }
}
