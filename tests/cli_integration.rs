//! CLI integration tests for dokk
//!
//! These tests exercise scanning, listing, exporting, and error reporting
//! through the real binary, using temporary directories as fixtures.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the dokk binary
fn dokk_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("dokk"))
}

/// Create a directory with two valid link files
fn seeded_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.dokk"), "\"X\" -> \"https://x.test\"\n").unwrap();
    fs::write(dir.path().join("b.dokk"), "\"Y\" -> \"https://y.test\"\n").unwrap();
    dir
}

// =============================================================================
// Listing
// =============================================================================

#[test]
fn test_list_shows_all_links() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "--no-color", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("X"))
        .stdout(predicate::str::contains("https://x.test"))
        .stdout(predicate::str::contains("Y"));
}

#[test]
fn test_list_empty_directory() {
    let dir = TempDir::new().unwrap();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No links found"));
}

#[test]
fn test_list_export_json_shape() {
    let dir = seeded_dir();

    let output = dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "list",
            "--export",
            "json",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();

    assert_eq!(json["scan_info"]["total_entries"], 2);
    assert_eq!(json["scan_info"]["total_files"], 2);

    let flattened: usize = json["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["entries"].as_array().unwrap().len())
        .sum();
    assert_eq!(flattened, 2);
}

#[test]
fn test_malformed_file_is_skipped_with_warning() {
    let dir = seeded_dir();
    fs::write(dir.path().join("broken.dokk"), "this is not a link\n").unwrap();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "--no-color", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://x.test"))
        .stderr(predicate::str::contains("skipping"))
        .stderr(predicate::str::contains("broken.dokk"));
}

#[test]
fn test_missing_scan_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    dokk_cmd()
        .args(["--path", missing.to_str().unwrap(), "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("directory not found"));
}

// =============================================================================
// Recursion
// =============================================================================

#[test]
fn test_recursive_scan_is_the_default() {
    let dir = seeded_dir();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("nested.dokk"), "\"Nested\" -> \"https://nested.test\"\n").unwrap();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "--no-color", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nested"));
}

#[test]
fn test_no_recursive_skips_subdirectories() {
    let dir = seeded_dir();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("nested.dokk"), "\"Nested\" -> \"https://nested.test\"\n").unwrap();

    dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "--no-recursive",
            "--no-color",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nested").not())
        .stdout(predicate::str::contains("X"));
}

#[test]
fn test_config_file_controls_recursion() {
    let dir = seeded_dir();
    let sub = dir.path().join("sub");
    fs::create_dir(&sub).unwrap();
    fs::write(sub.join("nested.dokk"), "\"Nested\" -> \"https://nested.test\"\n").unwrap();
    fs::write(dir.path().join("dokk.toml"), "[scan]\nrecursive = false\n").unwrap();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "--no-color", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nested").not());

    // The CLI flag overrides the config file
    dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "--recursive",
            "--no-color",
            "list",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nested"));
}

// =============================================================================
// Search, stats, validate
// =============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let dir = seeded_dir();

    dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "--no-color",
            "search",
            "x",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://x.test"))
        .stdout(predicate::str::contains("https://y.test").not());
}

#[test]
fn test_search_without_matches_warns() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "search", "zzz"])
        .assert()
        .success()
        .stderr(predicate::str::contains("no links match"));
}

#[test]
fn test_stats_text() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "stats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Links:   2"))
        .stdout(predicate::str::contains("Files:   2"))
        .stdout(predicate::str::contains("Domains: 2"));
}

#[test]
fn test_stats_json() {
    let dir = seeded_dir();

    let output = dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
            "stats",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total_links"], 2);
    assert_eq!(json["total_files"], 2);
    assert_eq!(json["unique_domains"], 2);
}

#[test]
fn test_stats_on_empty_directory_are_zero() {
    let dir = TempDir::new().unwrap();

    let output = dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "--format",
            "json",
            "stats",
        ])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["total_links"], 0);
    assert_eq!(json["total_files"], 0);
    assert_eq!(json["unique_domains"], 0);
}

#[test]
fn test_validate_passes_for_scanned_links() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All links are valid"));
}

// =============================================================================
// Open
// =============================================================================

#[test]
fn test_open_rejects_out_of_range_index() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "open", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no link with number 99"));
}

#[test]
fn test_open_requires_index_or_all() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "open"])
        .assert()
        .failure();
}

#[test]
fn test_open_all_can_be_declined() {
    let dir = seeded_dir();

    // Default config asks for confirmation; an empty stdin declines
    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "open", "--all"])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled"));
}

// =============================================================================
// Export
// =============================================================================

#[test]
fn test_export_markdown_to_file() {
    let dir = seeded_dir();
    let out = dir.path().join("links.md");

    dokk_cmd()
        .args([
            "--path",
            dir.path().to_str().unwrap(),
            "export",
            "markdown",
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 links"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("# Documentation Links"));
    assert!(content.contains("## a.dokk"));
    assert!(content.contains("- [X](https://x.test)"));
}

#[test]
fn test_export_html_to_stdout() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "export", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<!DOCTYPE html>"))
        .stdout(predicate::str::contains(
            "<li><a href=\"https://x.test\">X</a></li>",
        ));
}

#[test]
fn test_export_rejects_unknown_format() {
    let dir = seeded_dir();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "export", "yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported export format"));
}

// =============================================================================
// Config
// =============================================================================

#[test]
fn test_config_init_writes_template() {
    let dir = TempDir::new().unwrap();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote configuration template"));

    assert!(dir.path().join("dokk.toml").is_file());

    // A second init must not overwrite the existing file
    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_config_show_prints_effective_config() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("dokk.toml"), "[scan]\nrecursive = false\n").unwrap();

    dokk_cmd()
        .args(["--path", dir.path().to_str().unwrap(), "config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recursive = false"));
}
