//! Treeflat: reversible directory flattening
//!
//! Copies every file of a source tree into one flat directory, encoding each
//! file's relative path and a sequence number into its name, and restores the
//! tree from such a directory.

pub mod cli;
pub mod codec;
pub mod config;
pub mod copy;
pub mod error;
pub mod logging;
pub mod run;
pub mod tree;
pub mod validate;
