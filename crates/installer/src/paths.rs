//! Operator path handling: `~` expansion and lexical absolutization.

use std::path::{Component, Path, PathBuf};

/// Resolve a leading `~` or `~/` to the current user's home directory.
///
/// `~otheruser` forms and inputs without a leading tilde are returned as-is,
/// as is everything when no home directory can be determined.
#[must_use]
pub fn expand_user(input: &str) -> PathBuf {
    let rest = if input == "~" {
        Some("")
    } else {
        input.strip_prefix("~/")
    };

    match (rest, dirs::home_dir()) {
        (Some(""), Some(home)) => home,
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(input),
    }
}

/// Make `path` absolute against `cwd` and drop `.` and `..` components.
///
/// Purely lexical; symlinks are not resolved and the path need not exist.
#[must_use]
pub fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}
