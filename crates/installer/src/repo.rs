//! Worker repository acquisition.
//!
//! Each sync starts from a clean destination: any previous clone is removed
//! before a fresh `git clone`. Local edits in an old clone are lost.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::InstallerSettings;
use crate::error::{InstallError, Result};
use crate::exec::{CommandRunner, ExecMode, Invocation};
use crate::ui;

/// Clones the worker repository into an install directory.
pub struct RepoSync<'a> {
    runner: &'a dyn CommandRunner,
    settings: &'a InstallerSettings,
}

impl<'a> RepoSync<'a> {
    #[must_use]
    pub fn new(runner: &'a dyn CommandRunner, settings: &'a InstallerSettings) -> Self {
        Self { runner, settings }
    }

    /// Remove any existing clone under `install_path`, then clone afresh.
    ///
    /// Returns the repository path.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::RemoveExisting`] if the old clone cannot be
    /// deleted, or [`InstallError::Clone`] if `git clone` fails or git is
    /// missing.
    pub fn sync(&self, install_path: &Path) -> Result<PathBuf> {
        let repo_path = self.settings.repo_path(install_path);

        Self::remove_existing(&repo_path)?;

        ui::print_step(&format!(
            "Cloning repository from {}...",
            self.settings.repo_url
        ));
        info!(url = %self.settings.repo_url, dest = %install_path.display(), "Cloning repository");

        let clone = Invocation::new("git")
            .args(["clone", self.settings.repo_url.as_str()])
            .current_dir(install_path);

        let spinner = ui::spinner("git clone");
        let result = self.runner.run(&clone, ExecMode::Captured);
        spinner.finish_and_clear();

        match result {
            Ok(outcome) if outcome.success => {}
            Ok(outcome) => {
                return Err(InstallError::Clone {
                    detail: outcome.failure_detail(),
                })
            }
            Err(err) => {
                return Err(InstallError::Clone {
                    detail: err.to_string(),
                })
            }
        }

        ui::print_success(&format!("Repository cloned to {}", repo_path.display()));
        Ok(repo_path)
    }

    fn remove_existing(repo_path: &Path) -> Result<()> {
        let Ok(metadata) = std::fs::symlink_metadata(repo_path) else {
            debug!(path = %repo_path.display(), "No previous clone");
            return Ok(());
        };

        ui::print_info(&format!(
            "Removing existing repository at {}...",
            repo_path.display()
        ));

        let removed = if metadata.is_dir() {
            std::fs::remove_dir_all(repo_path)
        } else {
            std::fs::remove_file(repo_path)
        };
        removed.map_err(|source| InstallError::RemoveExisting {
            path: repo_path.to_path_buf(),
            source,
        })?;

        info!(path = %repo_path.display(), "Removed previous clone");
        ui::print_success("Existing repository removed");
        Ok(())
    }
}
