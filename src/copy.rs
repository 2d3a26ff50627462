//! Byte copying and directory creation

use crate::error::FlattenError;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

/// Copy the bytes of `src` into `dst`, creating or truncating `dst`.
///
/// Returns the number of bytes written. Failures are surfaced as
/// [`FlattenError::Copy`] and never retried.
pub fn copy_bytes(src: &Path, dst: &Path) -> Result<u64, FlattenError> {
    let wrap = |source: io::Error| FlattenError::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        source,
    };

    let mut reader = BufReader::new(File::open(src).map_err(wrap)?);
    let mut writer = BufWriter::new(File::create(dst).map_err(wrap)?);
    let written = io::copy(&mut reader, &mut writer).map_err(wrap)?;
    writer.flush().map_err(wrap)?;
    Ok(written)
}

/// Create `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir_exists(path: &Path) -> Result<(), FlattenError> {
    fs::create_dir_all(path).map_err(|source| FlattenError::CreateDestination {
        path: path.to_path_buf(),
        source,
    })
}
