//! Interactive path collection.
//!
//! Each routine is a small bounded loop over a [`Prompter`]. The terminal
//! implementation uses `dialoguer`; tests drive the same routines with
//! scripted answers.

use std::path::{Path, PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use tracing::{debug, info};

use crate::error::{InstallError, Result};
use crate::paths;
use crate::ui;

/// Suggested movie collection, relative to the library.
pub const DEFAULT_MOVIE_COLLECTION: &str = "Movies";
/// Suggested TV collection, relative to the library.
pub const DEFAULT_TV_COLLECTION: &str = "TV";

/// Source of operator answers.
pub trait Prompter {
    /// Ask for a line of text. Returns it trimmed; empty input is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Prompt`] if input cannot be read.
    fn input(&self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question. Anything but an explicit yes is `false`.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Prompt`] if input cannot be read.
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Prompts on the controlling terminal.
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str) -> Result<String> {
        let answer: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
            .map_err(|e| InstallError::Prompt(e.to_string()))?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .wait_for_newline(true)
            .interact()
            .map_err(|e| InstallError::Prompt(e.to_string()))
    }
}

/// Collects the paths an installation needs.
pub struct PathCollector<'a> {
    prompter: &'a dyn Prompter,
    /// Default install directory and base for relative input.
    cwd: PathBuf,
}

impl<'a> PathCollector<'a> {
    #[must_use]
    pub fn new(prompter: &'a dyn Prompter, cwd: PathBuf) -> Self {
        Self { prompter, cwd }
    }

    /// Ask where to install. Empty input means the current directory.
    ///
    /// A directory that does not exist yet is created.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::CreateInstallDir`] if the directory cannot be
    /// created.
    pub fn install_path(&self) -> Result<PathBuf> {
        ui::print_heading("Installation Path");
        ui::print_info(&format!("Default: {}", self.cwd.display()));

        let answer = self
            .prompter
            .input("Enter installation path (press Enter for current folder)")?;

        if answer.is_empty() {
            debug!(path = %self.cwd.display(), "Using current directory as install path");
            return Ok(self.cwd.clone());
        }

        let install_path = paths::absolutize(&paths::expand_user(&answer), &self.cwd);

        if !install_path.exists() {
            std::fs::create_dir_all(&install_path).map_err(|source| {
                InstallError::CreateInstallDir {
                    path: install_path.clone(),
                    source,
                }
            })?;
            ui::print_success(&format!("Created directory: {}", install_path.display()));
            info!(path = %install_path.display(), "Created install directory");
        }

        Ok(install_path)
    }

    /// Ask for the media library root until an answer is accepted.
    ///
    /// Empty answers are rejected. A path that does not exist is accepted only
    /// after explicit confirmation; declining asks for the path again.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Prompt`] if input cannot be read.
    pub fn library_path(&self) -> Result<String> {
        ui::print_heading("Movie Library Path");
        println!("Please provide the full absolute path to your movie library.");
        println!();
        println!("Examples:");
        ui::print_list_item("Windows (external drive): /e/Library");
        ui::print_list_item("Windows (local folder):   /c/Users/yourusername/Videos/Library");
        ui::print_list_item("macOS (external drive):   /Volumes/DRIVE_NAME/Library");
        ui::print_list_item("macOS (local folder):     /Users/yourusername/Movies/Library");

        loop {
            let answer = self
                .prompter
                .input("Enter full absolute path to movie library")?;

            if answer.is_empty() {
                ui::print_error("Library path cannot be empty.");
                continue;
            }

            let library_path = paths::expand_user(&answer);

            if !self.resolve(&library_path).exists() {
                let proceed = self.prompter.confirm(&format!(
                    "WARNING: Path '{}' does not exist. Continue anyway?",
                    library_path.display()
                ))?;
                if !proceed {
                    debug!(path = %library_path.display(), "Nonexistent library path declined");
                    continue;
                }
            }

            return Ok(library_path.to_string_lossy().into_owned());
        }
    }

    /// Ask for a collection inside the library, offering a suggestion.
    ///
    /// Empty input takes the suggestion; anything else is used verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Prompt`] if input cannot be read.
    pub fn collection_path(&self, collection: &str, suggested: &str) -> Result<String> {
        ui::print_heading(&format!("{collection} Collection Path"));
        println!(
            "Enter the path of the {} collection within the library folder.",
            collection.to_lowercase()
        );
        ui::print_info(&format!("Suggested: {suggested}"));

        let answer = self
            .prompter
            .input(&format!("Enter path (press Enter for '{suggested}')"))?;

        if answer.is_empty() {
            Ok(suggested.to_string())
        } else {
            Ok(answer)
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedPrompter;

    #[test]
    fn test_empty_install_path_uses_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        let prompter = ScriptedPrompter::new([""]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        assert_eq!(collector.install_path().unwrap(), cwd.path());
    }

    #[test]
    fn test_relative_install_path_is_created_under_cwd() {
        let cwd = tempfile::tempdir().unwrap();
        let prompter = ScriptedPrompter::new(["nested/worker"]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        let path = collector.install_path().unwrap();
        assert_eq!(path, cwd.path().join("nested").join("worker"));
        assert!(path.is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_install_path_creation_failure() {
        let cwd = tempfile::tempdir().unwrap();
        let blocker = cwd.path().join("file");
        std::fs::write(&blocker, "not a dir").unwrap();
        let prompter = ScriptedPrompter::new(["file/sub"]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        let err = collector.install_path().unwrap_err();
        assert!(matches!(err, InstallError::CreateInstallDir { .. }));
    }

    #[test]
    fn test_library_path_rejects_empty_then_accepts_existing() {
        let library = tempfile::tempdir().unwrap();
        let library_str = library.path().to_string_lossy().into_owned();
        let prompter = ScriptedPrompter::new(["", library_str.as_str()]);
        let collector = PathCollector::new(&prompter, library.path().to_path_buf());

        assert_eq!(collector.library_path().unwrap(), library_str);
        assert_eq!(prompter.confirmations_asked(), 0);
    }

    #[test]
    fn test_declined_missing_library_path_reprompts_for_path() {
        let cwd = tempfile::tempdir().unwrap();
        let missing = cwd.path().join("missing").to_string_lossy().into_owned();
        let existing = cwd.path().to_string_lossy().into_owned();
        let prompter = ScriptedPrompter::new([missing.as_str(), existing.as_str()])
            .with_confirmations([false]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        let accepted = collector.library_path().unwrap();
        assert_eq!(accepted, existing);
        assert_ne!(accepted, missing);
        assert_eq!(prompter.inputs_asked(), 2);
        assert_eq!(prompter.confirmations_asked(), 1);
    }

    #[test]
    fn test_confirmed_missing_library_path_is_accepted() {
        let cwd = tempfile::tempdir().unwrap();
        let missing = cwd.path().join("offline-drive").to_string_lossy().into_owned();
        let prompter = ScriptedPrompter::new([missing.as_str()]).with_confirmations([true]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        assert_eq!(collector.library_path().unwrap(), missing);
    }

    #[test]
    fn test_collection_path_default_and_override() {
        let cwd = tempfile::tempdir().unwrap();
        let prompter = ScriptedPrompter::new(["", "Shows/Series"]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        assert_eq!(
            collector
                .collection_path("Movie", DEFAULT_MOVIE_COLLECTION)
                .unwrap(),
            "Movies"
        );
        assert_eq!(
            collector
                .collection_path("TV Show", DEFAULT_TV_COLLECTION)
                .unwrap(),
            "Shows/Series"
        );
    }

    #[test]
    fn test_exhausted_input_is_prompt_error() {
        let cwd = tempfile::tempdir().unwrap();
        let prompter = ScriptedPrompter::new([""]);
        let collector = PathCollector::new(&prompter, cwd.path().to_path_buf());

        let err = collector.library_path().unwrap_err();
        assert!(matches!(err, InstallError::Prompt(_)));
    }
}
