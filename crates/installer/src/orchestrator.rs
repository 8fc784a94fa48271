//! Installer orchestration module.
//!
//! This module sequences a full installation:
//! - Install directory selection
//! - Fresh clone of the worker repository
//! - Container runtime check
//! - Library path collection and config update
//! - Worker lifecycle scripts

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::{InstallContext, InstallMode, InstallerSettings};
use crate::error::{InstallError, Result};
use crate::exec::CommandRunner;
use crate::lifecycle::Lifecycle;
use crate::prompt::{PathCollector, Prompter, DEFAULT_MOVIE_COLLECTION, DEFAULT_TV_COLLECTION};
use crate::repo::RepoSync;
use crate::ui;
use crate::validator::RuntimeChecker;
use crate::worker_config;

/// Main installer struct that drives one installation run.
pub struct Installer<'a> {
    runner: &'a dyn CommandRunner,
    prompter: &'a dyn Prompter,
    settings: InstallerSettings,
    mode: InstallMode,
    /// Default install directory and base for relative answers.
    cwd: PathBuf,
}

impl<'a> Installer<'a> {
    #[must_use]
    pub fn new(
        runner: &'a dyn CommandRunner,
        prompter: &'a dyn Prompter,
        mode: InstallMode,
        cwd: PathBuf,
    ) -> Self {
        Self {
            runner,
            prompter,
            settings: InstallerSettings::default(),
            mode,
            cwd,
        }
    }

    /// Override the fixed locations and programs.
    #[must_use]
    pub fn with_settings(mut self, settings: InstallerSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Run the whole workflow and return what was collected.
    ///
    /// Every stage runs to completion before the next starts. The first fatal
    /// failure is returned as-is; nothing already done is undone.
    ///
    /// # Errors
    ///
    /// Returns the [`InstallError`] of the first stage that failed.
    pub fn run(&self) -> Result<InstallContext> {
        ui::print_banner();
        info!(mode = %self.mode, "Starting installation");

        let mut ctx = InstallContext::new(self.mode);
        let collector = PathCollector::new(self.prompter, self.cwd.clone());

        ctx.install_path = collector.install_path()?;
        ctx.repo_path = RepoSync::new(self.runner, &self.settings).sync(&ctx.install_path)?;

        if !RuntimeChecker::new(self.runner, &self.settings).check_runtime_available() {
            return Err(InstallError::RuntimeUnavailable);
        }

        ctx.library_path = collector.library_path()?;
        ctx.movie_collection_path =
            collector.collection_path("Movie", DEFAULT_MOVIE_COLLECTION)?;
        ctx.tv_collection_path = collector.collection_path("TV Show", DEFAULT_TV_COLLECTION)?;

        debug!(context = ?serde_json::to_string(&ctx).ok(), "Collected installation context");

        worker_config::update_config(&ctx.repo_path, &ctx)?;

        let report = Lifecycle::new(self.runner, &self.settings)
            .run_sequence(&ctx.repo_path, ctx.mode)?;
        info!(
            scripts = report.completed.len(),
            warnings = report.warnings.len(),
            "Lifecycle scripts finished"
        );

        ui::print_summary(&ctx, &self.settings);
        Ok(ctx)
    }
}
