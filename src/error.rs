//! Error types for the treeflat flatten/unflatten tool.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by a flatten or unflatten run.
///
/// Every variant is terminal for the current run; nothing is retried.
#[derive(Debug, Error)]
pub enum FlattenError {
    #[error("Source directory '{}' does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("Source path '{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("Error creating destination directory '{}': {source}", .path.display())]
    CreateDestination {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "the following paths exceed {limit} characters when encrypted:\n{}",
        .paths.join("\n")
    )]
    Validation { limit: usize, paths: Vec<String> },

    #[error("Failed to walk directory: {0}")]
    Walk(String),

    #[error("Failed to copy {} to {}: {source}", .src.display(), .dst.display())]
    Copy {
        src: PathBuf,
        dst: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Flat name collision: '{first}' and '{second}' both encode to '{name}'")]
    Collision {
        name: String,
        first: String,
        second: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for FlattenError {
    fn from(err: config::ConfigError) -> Self {
        FlattenError::Config(err.to_string())
    }
}

impl From<walkdir::Error> for FlattenError {
    fn from(err: walkdir::Error) -> Self {
        FlattenError::Walk(err.to_string())
    }
}
