//! Installation configuration types.
//!
//! This module defines the installation mode, the context threaded through
//! every stage of a run, and the fixed settings the installer works against.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Name of the environment variable exported to lifecycle scripts in dev mode.
pub const STAGE_ENV: &str = "STAGE";

/// Installation flavor, fixed for the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InstallMode {
    /// Development: `dev.json` and `STAGE=dev`.
    Dev,
    /// Production: `prod.json`, `STAGE` left unset.
    #[default]
    Prod,
}

impl InstallMode {
    /// Map the `--dev` flag to a mode.
    #[must_use]
    pub fn from_dev_flag(dev: bool) -> Self {
        if dev {
            Self::Dev
        } else {
            Self::Prod
        }
    }

    /// Configuration file name inside the repository's `config/` directory.
    #[must_use]
    pub fn config_file_name(self) -> &'static str {
        match self {
            Self::Dev => "dev.json",
            Self::Prod => "prod.json",
        }
    }

    /// Extra environment for lifecycle scripts.
    #[must_use]
    pub fn stage_env(self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Dev => Some((STAGE_ENV, "dev")),
            Self::Prod => None,
        }
    }

    /// Human-readable label for the final summary.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dev => "Development",
            Self::Prod => "Production",
        }
    }
}

impl std::fmt::Display for InstallMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dev => write!(f, "dev"),
            Self::Prod => write!(f, "prod"),
        }
    }
}

impl std::str::FromStr for InstallMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "prod" | "production" => Ok(Self::Prod),
            _ => Err(anyhow::anyhow!("Unknown mode: {s}. Supported: dev, prod")),
        }
    }
}

/// State collected during a run.
///
/// Created empty when the run starts and filled in stage by stage; nothing
/// changes after the configuration file has been written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallContext {
    /// Absolute directory the repository is cloned into.
    pub install_path: PathBuf,
    /// `install_path` joined with the repository name.
    pub repo_path: PathBuf,
    /// Root of the operator's media library.
    pub library_path: String,
    /// Movie collection, relative to the library by convention.
    pub movie_collection_path: String,
    /// TV collection, relative to the library by convention.
    pub tv_collection_path: String,
    /// Installation flavor.
    pub mode: InstallMode,
}

impl InstallContext {
    #[must_use]
    pub fn new(mode: InstallMode) -> Self {
        Self {
            install_path: PathBuf::new(),
            repo_path: PathBuf::new(),
            library_path: String::new(),
            movie_collection_path: String::new(),
            tv_collection_path: String::new(),
            mode,
        }
    }
}

/// Fixed locations and programs the installer works against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallerSettings {
    /// Remote the worker source is cloned from.
    pub repo_url: String,
    /// Directory name `git clone` produces.
    pub repo_name: String,
    /// Container runtime name shown to the operator.
    pub runtime_name: String,
    /// Container runtime CLI.
    pub runtime_program: String,
    /// Where to send operators who lack the runtime.
    pub runtime_install_url: String,
    /// Shell used to run lifecycle scripts.
    pub script_shell: String,
    /// Shown after a successful install.
    pub portal_url: String,
}

impl Default for InstallerSettings {
    fn default() -> Self {
        Self {
            repo_url: "https://github.com/anuvgupta/media-library-source-worker".into(),
            repo_name: "media-library-source-worker".into(),
            runtime_name: "Docker".into(),
            runtime_program: "docker".into(),
            runtime_install_url: "https://www.docker.com/get-started".into(),
            script_shell: "bash".into(),
            portal_url: "https://streamy.sh".into(),
        }
    }
}

impl InstallerSettings {
    /// Where the clone lands for a given install directory.
    #[must_use]
    pub fn repo_path(&self, install_path: &std::path::Path) -> PathBuf {
        install_path.join(&self.repo_name)
    }
}
