//! Fatal installer failures.
//!
//! Every variant aborts the workflow. The binary prints the message and exits
//! with a non-zero status; nothing is rolled back.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that terminate an installation run.
#[derive(Error, Debug)]
pub enum InstallError {
    /// The chosen install directory could not be created.
    #[error("Error creating directory {}: {source}", .path.display())]
    CreateInstallDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A previous clone could not be removed.
    #[error("Error removing existing repository at {}: {source}", .path.display())]
    RemoveExisting {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `git clone` did not succeed.
    #[error("Failed to clone repository. Make sure git is installed. {detail}")]
    Clone { detail: String },

    /// Container runtime missing or its daemon unreachable.
    #[error("Docker is not available; install it and start the daemon, then re-run the installer")]
    RuntimeUnavailable,

    /// The mode-selected configuration file does not ship in the clone.
    #[error("Configuration file not found at {}", .0.display())]
    ConfigMissing(PathBuf),

    /// The configuration file could not be read.
    #[error("Failed to read configuration {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON.
    #[error("Failed to parse configuration {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file parsed, but not as a JSON object.
    #[error("Failed to update configuration {}: top-level value is not a JSON object", .0.display())]
    ConfigNotObject(PathBuf),

    /// The updated configuration could not be serialized.
    #[error("Failed to render configuration {}: {source}", .path.display())]
    ConfigRender {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The updated configuration could not be written back.
    #[error("Failed to update configuration {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A lifecycle script whose failure policy is abort exited non-zero.
    #[error("{script} failed")]
    ScriptFailed { script: String },

    /// A program could not be started at all.
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Reading operator input failed (closed terminal, interrupted read).
    #[error("Failed to read input: {0}")]
    Prompt(String),
}

/// Result alias used by every installer stage.
pub type Result<T, E = InstallError> = std::result::Result<T, E>;
