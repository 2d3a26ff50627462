//! Property-based tests for the flat name codec

use proptest::prelude::*;
use std::path::PathBuf;
use treeflat::codec::{decode, decode_strict, encode, MAX_FILE_NAME_LENGTH, SEPARATOR};

/// Path segments free of separators, illegal characters and the separator token.
fn segment() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ._-]{1,12}".prop_filter("no separator token or dot segments", |s| {
        !s.contains(SEPARATOR) && s != "." && s != ".."
    })
}

fn relative_path() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment(), 1..6)
}

proptest! {
    /// Decoding an encoded path yields the original path
    #[test]
    fn decode_inverts_encode(segments in relative_path(), sequence in 1u32..1000) {
        let relative = segments.join("/");
        let name = encode(&relative, sequence);
        prop_assume!(name.len() <= MAX_FILE_NAME_LENGTH);

        let expected: PathBuf = segments.iter().collect();
        prop_assert_eq!(decode(&name), expected.clone());
        prop_assert_eq!(decode_strict(&name), Some(expected));
    }

    /// Encoded names never exceed the file name limit
    #[test]
    fn encode_respects_length_limit(relative in "\\PC{0,400}", sequence in 1u32..100_000) {
        prop_assert!(encode(&relative, sequence).len() <= MAX_FILE_NAME_LENGTH);
    }

    /// Encoded names are single path segments
    #[test]
    fn encode_produces_flat_names(relative in "\\PC{0,100}", sequence in 1u32..1000) {
        let name = encode(&relative, sequence);
        prop_assert!(!name.contains('/'));
        prop_assert!(!name.contains('\\'));
    }

    /// Distinct sequence numbers never share a flat name
    #[test]
    fn sequence_keeps_names_distinct(
        a in "[a-z/]{1,20}",
        b in "[a-z/]{1,20}",
        sa in 1u32..1000,
        sb in 1u32..1000,
    ) {
        prop_assume!(sa != sb);
        prop_assert_ne!(encode(&a, sa), encode(&b, sb));
    }
}
