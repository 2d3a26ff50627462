//! Integration tests for flattening a source tree

use crate::integration::test_utils::{list_names, sample_tree, write_file};
use std::fs;
use tempfile::TempDir;
use treeflat::config::RunOptions;
use treeflat::run::FlattenRun;

#[test]
fn test_sample_tree_flat_names() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    sample_tree(&src);

    let report = FlattenRun::new(&src, &out, RunOptions::default())
        .unwrap()
        .execute()
        .unwrap();

    assert_eq!(report.copies.len(), 3);
    assert_eq!(
        list_names(&out),
        vec!["001_!_a.txt", "002_!_sub_!_b.txt", "003_!_sub_!_deep_!_c.txt"]
    );
    assert_eq!(
        fs::read_to_string(out.join("003_!_sub_!_deep_!_c.txt")).unwrap(),
        "charlie"
    );
}

#[test]
fn test_destination_has_no_subdirectories() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    sample_tree(&src);
    fs::create_dir_all(src.join("empty").join("nested")).unwrap();

    FlattenRun::new(&src, &out, RunOptions::default())
        .unwrap()
        .execute()
        .unwrap();

    for entry in fs::read_dir(&out).unwrap() {
        assert!(entry.unwrap().file_type().unwrap().is_file());
    }
    assert_eq!(list_names(&out).len(), 3);
}

#[test]
fn test_colon_is_sanitized() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    // Colons are legal in Unix file names, so the source can hold one.
    if cfg!(windows) {
        return;
    }
    write_file(&src, "notes:v2.txt", "v2");

    FlattenRun::new(&src, &out, RunOptions::default())
        .unwrap()
        .execute()
        .unwrap();

    assert_eq!(list_names(&out), vec!["001_!_notes_v2.txt"]);
}

#[test]
fn test_sequence_numbers_are_stable_across_runs() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    sample_tree(&src);
    write_file(&src, "z.txt", "zulu");
    write_file(&src, "other/d.txt", "delta");

    let first = FlattenRun::new(&src, &temp_dir.path().join("one"), RunOptions::default())
        .unwrap()
        .execute()
        .unwrap();
    let second = FlattenRun::new(&src, &temp_dir.path().join("two"), RunOptions::default())
        .unwrap()
        .execute()
        .unwrap();

    let names = |r: &treeflat::run::RunReport| {
        r.copies.iter().map(|c| c.target.clone()).collect::<Vec<_>>()
    };
    assert_eq!(names(&first), names(&second));
    assert_eq!(
        names(&first),
        vec![
            "001_!_a.txt",
            "002_!_z.txt",
            "003_!_other_!_d.txt",
            "004_!_sub_!_b.txt",
            "005_!_sub_!_deep_!_c.txt",
        ]
    );
}

#[test]
fn test_empty_source_copies_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let out = temp_dir.path().join("out");
    fs::create_dir_all(src.join("only_dirs")).unwrap();

    let report = FlattenRun::new(&src, &out, RunOptions::default())
        .unwrap()
        .execute()
        .unwrap();

    assert!(report.copies.is_empty());
    assert!(list_names(&out).is_empty());
}
