//! Flat name codec
//!
//! Maps a relative path plus a sequence number onto a single file name and back.
//! Hierarchy is preserved by substituting a separator token for every path
//! separator; characters that are illegal in file names are replaced with `_`,
//! which is lossy.

use std::path::{PathBuf, MAIN_SEPARATOR_STR};

/// Token substituted for path separators inside a flat name.
pub const SEPARATOR: &str = "_!_";

/// Longest flat name, in bytes, that will be produced.
pub const MAX_FILE_NAME_LENGTH: usize = 255;

/// Characters replaced with `_` during encoding.
pub const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Minimum number of digits in the sequence prefix.
pub const SEQUENCE_WIDTH: usize = 3;

/// Build the flat name for `relative_path` without applying the length limit.
///
/// 1. Backslashes are normalized to forward slashes
/// 2. Every forward slash becomes [`SEPARATOR`]
/// 3. Remaining [`ILLEGAL_CHARS`] become `_`
/// 4. The zero-padded sequence number and a separator are prepended
pub fn compose(relative_path: &str, sequence: u32) -> String {
    let joined = relative_path.replace('\\', "/").replace('/', SEPARATOR);
    let sanitized: String = joined
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect();

    format!(
        "{:0width$}{}{}",
        sequence,
        SEPARATOR,
        sanitized,
        width = SEQUENCE_WIDTH
    )
}

/// Encode a relative path and sequence number into a flat name.
///
/// Names longer than [`MAX_FILE_NAME_LENGTH`] bytes are cut from the right at
/// the nearest character boundary. Truncation is not reversible.
pub fn encode(relative_path: &str, sequence: u32) -> String {
    let mut name = compose(relative_path, sequence);
    truncate_to_boundary(&mut name, MAX_FILE_NAME_LENGTH);
    name
}

/// Decode a flat name back into a relative path.
///
/// Names without the `<seq><SEPARATOR><path>` shape are returned unchanged.
pub fn decode(flat_name: &str) -> PathBuf {
    match split_sequence(flat_name) {
        Some((_, rest)) if !rest.is_empty() => {
            PathBuf::from(rest.replace(SEPARATOR, MAIN_SEPARATOR_STR))
        }
        _ => PathBuf::from(flat_name),
    }
}

/// Decode a flat name, rejecting anything that does not carry a numeric
/// sequence prefix of at least [`SEQUENCE_WIDTH`] digits.
pub fn decode_strict(flat_name: &str) -> Option<PathBuf> {
    let (sequence, rest) = split_sequence(flat_name)?;
    if sequence.len() < SEQUENCE_WIDTH
        || !sequence.bytes().all(|b| b.is_ascii_digit())
        || rest.is_empty()
    {
        return None;
    }
    Some(PathBuf::from(rest.replace(SEPARATOR, MAIN_SEPARATOR_STR)))
}

/// Parse the sequence number off a flat name, if it has one.
pub fn sequence_of(flat_name: &str) -> Option<u32> {
    let (sequence, _) = split_sequence(flat_name)?;
    sequence.parse().ok()
}

fn split_sequence(flat_name: &str) -> Option<(&str, &str)> {
    flat_name.split_once(SEPARATOR)
}

fn truncate_to_boundary(name: &mut String, max_len: usize) {
    if name.len() <= max_len {
        return;
    }
    let mut cut = max_len;
    while !name.is_char_boundary(cut) {
        cut -= 1;
    }
    name.truncate(cut);
}
