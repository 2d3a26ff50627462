//! Integration tests that drive the treeflat binary end to end.

use crate::integration::test_utils::{list_names, sample_tree};
use std::process::Command;
use tempfile::TempDir;

fn treeflat() -> Command {
    Command::new(env!("CARGO_BIN_EXE_treeflat"))
}

#[test]
fn test_encrypt_then_decrypt() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let flat = temp_dir.path().join("flat");
    let restored = temp_dir.path().join("restored");
    sample_tree(&src);

    let output = treeflat()
        .arg("--quiet")
        .arg("encrypt")
        .arg(&src)
        .arg(&flat)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "encrypt should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stdout).starts_with("Flattened 3 file(s)"));
    assert_eq!(list_names(&flat).len(), 3);

    let output = treeflat()
        .args(["--quiet", "--format", "json", "decrypt"])
        .arg(&flat)
        .arg(&restored)
        .output()
        .unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["mode"], "decrypt");
    assert_eq!(report["copies"].as_array().unwrap().len(), 3);
    assert!(restored.join("sub").join("deep").join("c.txt").is_file());
}

#[test]
fn test_missing_source_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope");

    let output = treeflat()
        .arg("--quiet")
        .arg("encrypt")
        .arg(&missing)
        .arg(temp_dir.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does not exist"), "stderr={stderr}");
}

#[test]
fn test_missing_arguments_print_usage() {
    let output = treeflat().arg("encrypt").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_unknown_mode_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let output = treeflat()
        .arg("shuffle")
        .arg(temp_dir.path())
        .arg(temp_dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value"));
}

#[test]
fn test_unknown_report_format_copies_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let src = temp_dir.path().join("src");
    let flat = temp_dir.path().join("flat");
    sample_tree(&src);

    let output = treeflat()
        .args(["--quiet", "--format", "yaml", "encrypt"])
        .arg(&src)
        .arg(&flat)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid value"));
    assert!(!flat.exists(), "nothing should be written for a bad --format");
}

#[test]
fn test_help_exits_successfully() {
    let output = treeflat().arg("--help").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Usage"));
}
