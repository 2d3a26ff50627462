//! Relative path helpers
//!
//! Entries are keyed by their path relative to the walk root, rendered with
//! forward slashes regardless of platform so ordering and encoding agree.

use crate::error::FlattenError;
use std::path::{Component, Path, PathBuf};

/// Canonicalize a walk root.
///
/// Uses `dunce` so Windows roots do not pick up the `\\?\` prefix.
pub fn canonical_root(root: &Path) -> Result<PathBuf, FlattenError> {
    if !root.exists() {
        return Err(FlattenError::SourceMissing(root.to_path_buf()));
    }
    let canonical = dunce::canonicalize(root)?;
    if !canonical.is_dir() {
        return Err(FlattenError::NotADirectory(root.to_path_buf()));
    }
    Ok(canonical)
}

/// Render `path` relative to `root` as a forward-slash string.
///
/// Names that are not valid UTF-8 are rejected, since distinct invalid names
/// could otherwise collapse onto the same encoded name.
pub fn relative_slash_path(root: &Path, path: &Path) -> Result<String, FlattenError> {
    let relative = path.strip_prefix(root).map_err(|_| {
        FlattenError::Walk(format!(
            "{} is not inside {}",
            path.display(),
            root.display()
        ))
    })?;
    if relative.to_str().is_none() {
        return Err(FlattenError::Walk(format!(
            "{} is not valid UTF-8",
            path.display()
        )));
    }
    Ok(to_slash(relative))
}

/// Join path components with `/`.
///
/// Non-UTF-8 components are rendered lossily; walk results never contain them.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent directory of a slash path, `"."` for entries directly under the root.
pub fn slash_parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => ".",
    }
}

/// True when a decoded path stays inside the destination root.
///
/// Rejects empty paths, absolute paths, `..`, and empty segments left behind
/// by a doubled separator.
pub fn is_contained(relative: &Path) -> bool {
    if relative.as_os_str().is_empty() {
        return false;
    }
    if relative.to_string_lossy().contains("//") {
        return false;
    }
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
