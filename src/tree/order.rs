//! Canonical traversal order and sequence assignment
//!
//! Re-running over an unchanged tree must yield the same sequence numbers, so
//! the walk order is discarded and replaced with a total order:
//!
//! 1. Entries directly under the root come first
//! 2. Then by parent directory, lexicographically
//! 3. Within one parent, files before directories
//! 4. Then by full relative path

use crate::tree::path::slash_parent;
use crate::tree::walker::Entry;
use std::cmp::Ordering;

/// Compare two entries in canonical traversal order.
pub fn canonical_cmp(a: &Entry, b: &Entry) -> Ordering {
    let a_parent = slash_parent(a.relative());
    let b_parent = slash_parent(b.relative());
    let a_is_root = a_parent == ".";
    let b_is_root = b_parent == ".";

    b_is_root
        .cmp(&a_is_root)
        .then_with(|| a_parent.cmp(b_parent))
        .then_with(|| a.is_dir().cmp(&b.is_dir()))
        .then_with(|| a.relative().cmp(b.relative()))
}

/// Sort entries into canonical traversal order in place.
pub fn sort_canonical(entries: &mut [Entry]) {
    entries.sort_by(canonical_cmp);
}

/// Hands out sequence numbers to files, starting at 1.
///
/// Directories never consume a number.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    next: u32,
}

impl SequenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next number for `entry`, or `None` for directories.
    pub fn assign(&mut self, entry: &Entry) -> Option<u32> {
        if entry.is_dir() {
            return None;
        }
        self.next += 1;
        Some(self.next)
    }

    /// Number of files counted so far.
    pub fn issued(&self) -> u32 {
        self.next
    }
}
