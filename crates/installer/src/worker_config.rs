//! Worker configuration update.
//!
//! Rewrites the three library path keys in the mode's JSON config and leaves
//! every other key, and the key order, as it was.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::info;

use crate::config::{InstallContext, InstallMode};
use crate::error::{InstallError, Result};
use crate::ui;

/// Directory inside the repository holding the per-mode config files.
pub const CONFIG_DIR: &str = "config";

pub const LIBRARY_PATH_KEY: &str = "libraryPath";
pub const LIBRARY_MOVIE_PATH_KEY: &str = "libraryMoviePath";
pub const LIBRARY_TV_PATH_KEY: &str = "libraryTvPath";

/// Path of the config file a mode uses.
#[must_use]
pub fn config_file_path(repo_path: &Path, mode: InstallMode) -> PathBuf {
    repo_path.join(CONFIG_DIR).join(mode.config_file_name())
}

/// Set the library paths from `ctx` in the mode's config file.
///
/// Returns the path of the file written.
///
/// # Errors
///
/// Returns [`InstallError::ConfigMissing`] if the file is absent,
/// [`InstallError::ConfigRead`], [`InstallError::ConfigParse`] or
/// [`InstallError::ConfigNotObject`] if it is not a readable JSON object, and
/// [`InstallError::ConfigRender`] or [`InstallError::ConfigWrite`] if it
/// cannot be saved.
pub fn update_config(repo_path: &Path, ctx: &InstallContext) -> Result<PathBuf> {
    let path = config_file_path(repo_path, ctx.mode);

    ui::print_step(&format!(
        "Updating configuration file: {}",
        ctx.mode.config_file_name()
    ));

    if !path.is_file() {
        return Err(InstallError::ConfigMissing(path));
    }

    let mut document = load(&path)?;
    apply_paths(&mut document, ctx);

    let mut rendered = serde_json::to_string_pretty(&Value::Object(document)).map_err(|source| {
        InstallError::ConfigRender {
            path: path.clone(),
            source,
        }
    })?;
    rendered.push('\n');

    std::fs::write(&path, rendered).map_err(|source| InstallError::ConfigWrite {
        path: path.clone(),
        source,
    })?;

    info!(
        file = %path.display(),
        library = %ctx.library_path,
        movies = %ctx.movie_collection_path,
        tv = %ctx.tv_collection_path,
        "Configuration updated"
    );
    ui::print_success("Configuration updated successfully");
    ui::print_kv(LIBRARY_PATH_KEY, &ctx.library_path);
    ui::print_kv(LIBRARY_MOVIE_PATH_KEY, &ctx.movie_collection_path);
    ui::print_kv(LIBRARY_TV_PATH_KEY, &ctx.tv_collection_path);

    Ok(path)
}

fn load(path: &Path) -> Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path).map_err(|source| InstallError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: Value =
        serde_json::from_str(&raw).map_err(|source| InstallError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

    match parsed {
        Value::Object(map) => Ok(map),
        _ => Err(InstallError::ConfigNotObject(path.to_path_buf())),
    }
}

/// Overwrite the three path keys; existing keys keep their position.
fn apply_paths(document: &mut Map<String, Value>, ctx: &InstallContext) {
    for (key, value) in [
        (LIBRARY_PATH_KEY, &ctx.library_path),
        (LIBRARY_MOVIE_PATH_KEY, &ctx.movie_collection_path),
        (LIBRARY_TV_PATH_KEY, &ctx.tv_collection_path),
    ] {
        document.insert(key.to_string(), Value::String(value.clone()));
    }
}
