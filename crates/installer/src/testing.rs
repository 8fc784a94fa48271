//! Scripted stand-ins for the terminal and for external processes.
//!
//! Used by the unit tests and by the workflow integration tests to run every
//! stage without a TTY, git, docker or the worker's scripts.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::error::{InstallError, Result};
use crate::exec::{CommandOutcome, CommandRunner, ExecMode, Invocation};
use crate::prompt::Prompter;

/// Answers prompts from a fixed script.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    inputs: RefCell<VecDeque<String>>,
    confirmations: RefCell<VecDeque<bool>>,
    inputs_asked: Cell<usize>,
    confirmations_asked: Cell<usize>,
}

impl ScriptedPrompter {
    /// Text answers, consumed in order.
    #[must_use]
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: RefCell::new(inputs.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    /// Yes/no answers, consumed in order.
    #[must_use]
    pub fn with_confirmations(self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.confirmations.borrow_mut().extend(answers);
        self
    }

    #[must_use]
    pub fn inputs_asked(&self) -> usize {
        self.inputs_asked.get()
    }

    #[must_use]
    pub fn confirmations_asked(&self) -> usize {
        self.confirmations_asked.get()
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        self.inputs_asked.set(self.inputs_asked.get() + 1);
        self.inputs
            .borrow_mut()
            .pop_front()
            .map(|answer| answer.trim().to_string())
            .ok_or_else(|| InstallError::Prompt(format!("no scripted answer for '{prompt}'")))
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.confirmations_asked
            .set(self.confirmations_asked.get() + 1);
        self.confirmations
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| InstallError::Prompt(format!("no scripted answer for '{prompt}'")))
    }
}

enum Reply {
    Outcome(CommandOutcome),
    SpawnFailure,
}

type Effect = Box<dyn Fn(&Invocation)>;

/// Records every invocation and answers from rules matched on the command line.
///
/// Rules match when their pattern is a substring of [`Invocation::display`];
/// the first match wins. Unmatched commands succeed with empty output.
#[derive(Default)]
pub struct RecordingRunner {
    calls: RefCell<Vec<(Invocation, ExecMode)>>,
    replies: Vec<(String, Reply)>,
    effects: Vec<(String, Effect)>,
}

impl RecordingRunner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Matching commands exit with `code`.
    #[must_use]
    pub fn fail(mut self, pattern: &str, code: i32) -> Self {
        self.replies.push((
            pattern.to_string(),
            Reply::Outcome(CommandOutcome {
                success: false,
                code: Some(code),
                stdout: String::new(),
                stderr: format!("{pattern} exited with {code}"),
            }),
        ));
        self
    }

    /// Matching commands succeed and print `stdout`.
    #[must_use]
    pub fn stdout(mut self, pattern: &str, stdout: &str) -> Self {
        self.replies.push((
            pattern.to_string(),
            Reply::Outcome(CommandOutcome {
                success: true,
                code: Some(0),
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        ));
        self
    }

    /// Matching commands cannot be started, as if the program were absent.
    #[must_use]
    pub fn missing(mut self, pattern: &str) -> Self {
        self.replies
            .push((pattern.to_string(), Reply::SpawnFailure));
        self
    }

    /// Run `effect` whenever a matching command is invoked, before replying.
    #[must_use]
    pub fn on_run(mut self, pattern: &str, effect: impl Fn(&Invocation) + 'static) -> Self {
        self.effects.push((pattern.to_string(), Box::new(effect)));
        self
    }

    /// Every invocation seen so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<(Invocation, ExecMode)> {
        self.calls.borrow().clone()
    }

    /// Command lines seen so far, in order.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .map(|(inv, _)| inv.display())
            .collect()
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation, mode: ExecMode) -> Result<CommandOutcome> {
        self.calls.borrow_mut().push((invocation.clone(), mode));
        let line = invocation.display();

        for (pattern, effect) in &self.effects {
            if line.contains(pattern.as_str()) {
                effect(invocation);
            }
        }

        let reply = self
            .replies
            .iter()
            .find(|(pattern, _)| line.contains(pattern.as_str()))
            .map(|(_, reply)| reply);

        match reply {
            Some(Reply::Outcome(outcome)) => Ok(outcome.clone()),
            Some(Reply::SpawnFailure) => Err(InstallError::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "program not found"),
            }),
            None => Ok(CommandOutcome {
                success: true,
                code: Some(0),
                ..CommandOutcome::default()
            }),
        }
    }
}
