//! Source tree enumeration
//!
//! Walks a directory, keys every entry by its slash-relative path, and puts
//! the result into the canonical order used for sequence numbering.

pub mod order;
pub mod path;
pub mod walker;
