//! Flatten and unflatten runs
//!
//! A run plans every copy up front (walk, validate, order, encode, length or
//! collision check) and only then touches the destination. The first error aborts the
//! run; files already written stay on disk.

use crate::codec::{compose, decode, decode_strict, MAX_FILE_NAME_LENGTH};
use crate::config::RunOptions;
use crate::copy::{copy_bytes, ensure_dir_exists};
use crate::error::FlattenError;
use crate::tree::order::{sort_canonical, SequenceCounter};
use crate::tree::path::{canonical_root, is_contained, to_slash};
use crate::tree::walker::{Entry, Walker};
use crate::validate::check_entries;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Direction of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Flatten a tree into encoded file names
    Encrypt,
    /// Rebuild a tree from encoded file names
    Decrypt,
}

/// One file scheduled for copying
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCopy {
    /// Sequence number (flatten runs only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<u32>,
    /// Path relative to the source root
    pub source: String,
    /// Path relative to the destination root
    pub target: String,
    #[serde(skip)]
    pub source_path: PathBuf,
    #[serde(skip)]
    pub target_path: PathBuf,
}

/// Outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub mode: Mode,
    pub dry_run: bool,
    pub copies: Vec<PlannedCopy>,
    /// Source files left untouched, with the reason
    pub skipped: Vec<SkippedFile>,
    pub bytes_copied: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub source: String,
    pub reason: String,
}

/// Make sure the destination directory exists.
///
/// Returns `true` when it had to be created.
pub fn prepare_destination(destination: &Path) -> Result<bool, FlattenError> {
    if destination.is_dir() {
        return Ok(false);
    }
    info!(
        destination = %destination.display(),
        "Destination directory does not exist. Creating it"
    );
    ensure_dir_exists(destination)?;
    Ok(true)
}

/// Keeps the first source seen for every decoded target and rejects repeats.
///
/// Flatten runs never need this: distinct sequence numbers already keep
/// flat names apart.
#[derive(Debug, Default)]
struct CollisionGuard {
    seen: HashMap<String, String>,
}

impl CollisionGuard {
    fn claim(&mut self, target: &str, source: &str) -> Result<(), FlattenError> {
        if let Some(first) = self.seen.get(target) {
            warn!(flat_name = target, first = %first, second = source, "Decoded path collision");
            return Err(FlattenError::Collision {
                name: target.to_string(),
                first: first.clone(),
                second: source.to_string(),
            });
        }
        self.seen.insert(target.to_string(), source.to_string());
        Ok(())
    }
}

/// Flattens a source tree into a single directory.
///
/// Owns the sequence counter for the run, so numbering restarts at 1 on
/// every [`FlattenRun::plan`].
pub struct FlattenRun {
    source: PathBuf,
    destination: PathBuf,
    options: RunOptions,
    counter: SequenceCounter,
}

impl FlattenRun {
    /// Create a run. Fails if the source is missing or not a directory.
    pub fn new(
        source: &Path,
        destination: &Path,
        options: RunOptions,
    ) -> Result<Self, FlattenError> {
        Ok(Self {
            source: canonical_root(source)?,
            destination: destination.to_path_buf(),
            options,
            counter: SequenceCounter::new(),
        })
    }

    /// Walk, validate and number the source tree without copying anything.
    pub fn plan(&mut self) -> Result<Vec<PlannedCopy>, FlattenError> {
        let mut entries = Walker::new(self.source.clone()).walk()?;
        check_entries(&entries)?;
        sort_canonical(&mut entries);

        self.counter = SequenceCounter::new();
        let mut plan = Vec::new();
        let mut long_paths = Vec::new();

        for entry in &entries {
            let Some(sequence) = self.counter.assign(entry) else {
                continue;
            };
            // Past 999 the prefix grows a digit, so re-check with the real number.
            let flat_name = compose(entry.relative(), sequence);
            if flat_name.len() > MAX_FILE_NAME_LENGTH {
                long_paths.push(entry.relative().to_string());
                continue;
            }

            plan.push(PlannedCopy {
                sequence: Some(sequence),
                source: entry.relative().to_string(),
                target_path: self.destination.join(&flat_name),
                target: flat_name,
                source_path: entry.path().to_path_buf(),
            });
        }

        if !long_paths.is_empty() {
            error!(
                count = long_paths.len(),
                "Paths exceed the file name limit with their sequence number"
            );
            return Err(FlattenError::Validation {
                limit: MAX_FILE_NAME_LENGTH,
                paths: long_paths,
            });
        }

        debug!(files = plan.len(), entries = entries.len(), "Flatten plan ready");
        Ok(plan)
    }

    /// Plan and, unless this is a dry run, copy every file.
    pub fn execute(mut self) -> Result<RunReport, FlattenError> {
        let copies = self.plan()?;
        let bytes_copied =
            perform(&copies, &self.destination, self.options.dry_run, false)?;

        info!(
            files = copies.len(),
            bytes = bytes_copied,
            dry_run = self.options.dry_run,
            "Flatten complete"
        );
        Ok(RunReport {
            mode: Mode::Encrypt,
            dry_run: self.options.dry_run,
            copies,
            skipped: Vec::new(),
            bytes_copied,
        })
    }
}

/// Rebuilds a directory tree from flat file names.
pub struct UnflattenRun {
    source: PathBuf,
    destination: PathBuf,
    options: RunOptions,
}

impl UnflattenRun {
    /// Create a run. Fails if the source is missing or not a directory.
    pub fn new(
        source: &Path,
        destination: &Path,
        options: RunOptions,
    ) -> Result<Self, FlattenError> {
        Ok(Self {
            source: canonical_root(source)?,
            destination: destination.to_path_buf(),
            options,
        })
    }

    /// Decode every flat file name and work out where it lands.
    ///
    /// Files are visited in canonical order. Only the file name is decoded;
    /// any subdirectory a flat file sits in is ignored.
    pub fn plan(&self) -> Result<(Vec<PlannedCopy>, Vec<SkippedFile>), FlattenError> {
        let mut entries = Walker::new(self.source.clone()).walk()?;
        sort_canonical(&mut entries);

        let mut guard = CollisionGuard::default();
        let mut plan = Vec::new();
        let mut skipped = Vec::new();

        for entry in entries.iter().filter(|e| !e.is_dir()) {
            let flat_name = file_name_of(entry);
            let decoded = if self.options.strict_decode {
                match decode_strict(flat_name) {
                    Some(path) => path,
                    None => {
                        warn!(file = entry.relative(), "Skipping unrecognized flat name");
                        skipped.push(SkippedFile {
                            source: entry.relative().to_string(),
                            reason: "unrecognized flat name".to_string(),
                        });
                        continue;
                    }
                }
            } else {
                decode(flat_name)
            };

            if !is_contained(&decoded) {
                warn!(
                    file = entry.relative(),
                    decoded = %decoded.display(),
                    "Skipping flat name that escapes the destination"
                );
                skipped.push(SkippedFile {
                    source: entry.relative().to_string(),
                    reason: "decoded path escapes destination".to_string(),
                });
                continue;
            }

            let target = to_slash(&decoded);
            guard.claim(&target, entry.relative())?;

            plan.push(PlannedCopy {
                sequence: None,
                source: entry.relative().to_string(),
                target,
                target_path: self.destination.join(&decoded),
                source_path: entry.path().to_path_buf(),
            });
        }

        debug!(files = plan.len(), skipped = skipped.len(), "Unflatten plan ready");
        Ok((plan, skipped))
    }

    /// Plan and, unless this is a dry run, copy every file into place.
    pub fn execute(self) -> Result<RunReport, FlattenError> {
        let (copies, skipped) = self.plan()?;
        let bytes_copied =
            perform(&copies, &self.destination, self.options.dry_run, true)?;

        info!(
            files = copies.len(),
            skipped = skipped.len(),
            bytes = bytes_copied,
            dry_run = self.options.dry_run,
            "Unflatten complete"
        );
        Ok(RunReport {
            mode: Mode::Decrypt,
            dry_run: self.options.dry_run,
            copies,
            skipped,
            bytes_copied,
        })
    }
}

/// Last segment of the entry's relative path, which the walker has already
/// checked to be valid UTF-8.
fn file_name_of(entry: &Entry) -> &str {
    let relative = entry.relative();
    relative.rsplit('/').next().unwrap_or(relative)
}

fn perform(
    copies: &[PlannedCopy],
    destination: &Path,
    dry_run: bool,
    create_parents: bool,
) -> Result<u64, FlattenError> {
    if dry_run {
        return Ok(0);
    }
    prepare_destination(destination)?;

    let mut total = 0;
    for copy in copies {
        if create_parents {
            if let Some(parent) = copy.target_path.parent() {
                ensure_dir_exists(parent)?;
            }
        }
        let written = copy_bytes(&copy.source_path, &copy.target_path)?;
        debug!(from = %copy.source, to = %copy.target, bytes = written, "Copied");
        total += written;
    }
    Ok(total)
}
