//! Integration tests for the all-or-nothing length check

use crate::integration::test_utils::write_file;
use tempfile::TempDir;
use treeflat::config::RunOptions;
use treeflat::error::FlattenError;
use treeflat::run::FlattenRun;
use treeflat::validate::validate_encryption;

#[test]
fn test_long_path_aborts_with_no_copies() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    let long_relative = format!("{}/{}/file.txt", "a".repeat(150), "b".repeat(150));
    write_file(&src, "early.txt", "copied first if the gate were per-file");
    write_file(&src, &long_relative, "too long");

    let err = FlattenRun::new(&src, &out, RunOptions::default())
        .unwrap()
        .execute()
        .unwrap_err();

    match err {
        FlattenError::Validation { limit, paths } => {
            assert_eq!(limit, 255);
            assert_eq!(paths, vec![long_relative]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!out.exists(), "no output should be written");
}

#[test]
fn test_validate_encryption_reports_every_offender() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path();
    let first = format!("{}/{}.txt", "x".repeat(130), "y".repeat(130));
    let second = format!("{}/{}.txt", "z".repeat(130), "w".repeat(130));
    write_file(src, &first, "1");
    write_file(src, &second, "2");
    write_file(src, "fine.txt", "3");

    match validate_encryption(src).unwrap_err() {
        FlattenError::Validation { paths, .. } => {
            let mut paths = paths;
            paths.sort();
            let mut expected = vec![first, second];
            expected.sort();
            assert_eq!(paths, expected);
        }
        other => panic!("unexpected error: {other}"),
    }
}
