//! Filesystem walker for enumerating a source tree

use crate::error::FlattenError;
use crate::tree::path::relative_slash_path;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filesystem entry discovered during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A regular file with its absolute path, slash-relative path and size
    File {
        path: PathBuf,
        relative: String,
        size: u64,
    },
    /// A directory with its absolute path and slash-relative path
    Directory { path: PathBuf, relative: String },
}

impl Entry {
    /// Absolute path on disk
    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path, .. } | Entry::Directory { path, .. } => path,
        }
    }

    /// Path relative to the walk root, `/`-separated
    pub fn relative(&self) -> &str {
        match self {
            Entry::File { relative, .. } | Entry::Directory { relative, .. } => relative,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, Entry::Directory { .. })
    }
}

/// Filesystem walker
///
/// Symbolic links are never followed and are left out of the result.
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    /// Create a new walker for the given root path
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the filesystem and collect all entries below the root.
    ///
    /// The first unreadable entry aborts the walk.
    pub fn walk(&self) -> Result<Vec<Entry>, FlattenError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .min_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            let path = entry.path().to_path_buf();
            let file_type = entry.file_type();

            if file_type.is_symlink() {
                debug!(path = %path.display(), "Skipping symbolic link");
                continue;
            }

            let relative = relative_slash_path(&self.root, &path)?;

            if file_type.is_dir() {
                entries.push(Entry::Directory { path, relative });
            } else if file_type.is_file() {
                let metadata = entry.metadata().map_err(|e| {
                    FlattenError::Walk(format!(
                        "Failed to read metadata for {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                entries.push(Entry::File {
                    path,
                    relative,
                    size: metadata.len(),
                });
            }
        }

        debug!(root = %self.root.display(), entries = entries.len(), "Walk complete");
        Ok(entries)
    }
}
