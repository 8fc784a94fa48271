//! Media Library Source Worker installer library.
//!
//! Provisions a host for the worker: clones its repository, checks for
//! Docker, writes the operator's library paths into the worker config and
//! runs the worker's build/setup/stop/start scripts.
//!
//! # Example
//!
//! ```ignore
//! use media_worker_installer::{InstallMode, Installer, SystemRunner, TerminalPrompter};
//!
//! fn main() -> anyhow::Result<()> {
//!     let prompter = TerminalPrompter::new();
//!     let cwd = std::env::current_dir()?;
//!     let ctx = Installer::new(&SystemRunner, &prompter, InstallMode::Prod, cwd).run()?;
//!     println!("installed to {}", ctx.repo_path.display());
//!     Ok(())
//! }
//! ```

// Allow product names without backticks in doc comments
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod error;
pub mod exec;
pub mod lifecycle;
pub mod orchestrator;
pub mod paths;
pub mod prompt;
pub mod repo;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod ui;
pub mod validator;
pub mod worker_config;

// Re-export commonly used types at the crate root
pub use config::{InstallContext, InstallMode, InstallerSettings};
pub use error::InstallError;
pub use exec::{CommandOutcome, CommandRunner, ExecMode, Invocation, SystemRunner};
pub use lifecycle::{FailurePolicy, LifecycleStep, LIFECYCLE_STEPS};
pub use orchestrator::Installer;
pub use prompt::{PathCollector, Prompter, TerminalPrompter};
