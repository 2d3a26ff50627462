//! Pre-flight validation for flatten runs
//!
//! Every file is encoded with a placeholder sequence number before anything is
//! copied. If any name would exceed the file name limit the whole run aborts.

use crate::codec::{compose, MAX_FILE_NAME_LENGTH};
use crate::error::FlattenError;
use crate::tree::walker::{Entry, Walker};
use std::path::Path;
use tracing::{debug, error};

/// Sequence number used when measuring encoded names.
pub const PLACEHOLDER_SEQUENCE: u32 = 1;

/// Relative paths whose encoded form is longer than the limit, in input order.
pub fn find_long_paths(entries: &[Entry]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.is_dir())
        .filter(|e| compose(e.relative(), PLACEHOLDER_SEQUENCE).len() > MAX_FILE_NAME_LENGTH)
        .map(|e| e.relative().to_string())
        .collect()
}

/// Fail with [`FlattenError::Validation`] if any entry is too long once encoded.
pub fn check_entries(entries: &[Entry]) -> Result<(), FlattenError> {
    let long_paths = find_long_paths(entries);
    if long_paths.is_empty() {
        debug!(files = entries.len(), "Validation passed");
        return Ok(());
    }

    error!(count = long_paths.len(), "Paths exceed the file name limit once encoded");
    Err(FlattenError::Validation {
        limit: MAX_FILE_NAME_LENGTH,
        paths: long_paths,
    })
}

/// Walk `source_root` and validate every file beneath it.
pub fn validate_encryption(source_root: &Path) -> Result<(), FlattenError> {
    let entries = Walker::new(source_root.to_path_buf()).walk()?;
    check_entries(&entries)
}
