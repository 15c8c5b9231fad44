//! CLI Integration Tests for tago
//!
//! These tests execute the binary and verify:
//! - The exact TAGS layout written for a small package
//! - Destination flags (-d, -n) and append mode
//! - Abort-on-parse-error versus --skip-errors
//! - Config file handling

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FOO_GO: &str = "package demo\n\nfunc Foo() {}\n";

const SHAPES_GO: &str = r#"package demo

import "math"

type Circle struct {
	R float64
}

func (c Circle) Area() float64 {
	area := math.Pi * c.R * c.R
	return area
}

var unit, zero = Circle{1}, Circle{0}
"#;

/// Helper to create a test directory with sample Go files
fn create_test_package() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("foo.go"), FOO_GO).unwrap();
    fs::write(temp_dir.path().join("shapes.go"), SHAPES_GO).unwrap();
    temp_dir
}

fn tago(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tago").unwrap();
    cmd.current_dir(dir.path());
    cmd
}

// ============================================================================
// Output Layout
// ============================================================================

#[test]
fn test_writes_tags_in_current_directory() {
    let dir = create_test_package();

    tago(&dir).arg("foo.go").assert().success();

    let tags = fs::read(dir.path().join("TAGS")).unwrap();
    assert_eq!(tags, b"\x0c\nfoo.go,20\nfunc Foo() {}Foo3,6\n");
}

#[test]
fn test_multiple_files_in_argument_order() {
    let dir = create_test_package();

    tago(&dir).args(["shapes.go", "foo.go"]).assert().success();

    let tags = String::from_utf8(fs::read(dir.path().join("TAGS")).unwrap()).unwrap();
    let shapes_body = "type Circle struct {Circle5,6\n\
                       func (c Circle) Area() float64 {Area9,17\n\
                       var unit, zero = Circle{1}, Circle{0}unit14,5\n\
                       var unit, zero = Circle{1}, Circle{0}zero14,11\n";
    let expected = format!(
        "\x0c\nshapes.go,{}\n{}\x0c\nfoo.go,20\nfunc Foo() {{}}Foo3,6\n",
        shapes_body.len(),
        shapes_body
    );
    assert_eq!(tags, expected);
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = create_test_package();

    tago(&dir).args(["foo.go", "shapes.go"]).assert().success();
    let first = fs::read(dir.path().join("TAGS")).unwrap();
    tago(&dir).args(["foo.go", "shapes.go"]).assert().success();
    let second = fs::read(dir.path().join("TAGS")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_overwrite_truncates_previous_index() {
    let dir = create_test_package();
    fs::write(dir.path().join("TAGS"), "x".repeat(4096)).unwrap();

    tago(&dir).arg("foo.go").assert().success();

    let tags = fs::read(dir.path().join("TAGS")).unwrap();
    assert_eq!(tags, b"\x0c\nfoo.go,20\nfunc Foo() {}Foo3,6\n");
}

#[test]
fn test_directory_argument() {
    let dir = create_test_package();

    tago(&dir).arg(".").assert().success();

    let tags = String::from_utf8(fs::read(dir.path().join("TAGS")).unwrap()).unwrap();
    let foo = tags.find("foo.go,").unwrap();
    let shapes = tags.find("shapes.go,").unwrap();
    assert!(foo < shapes);
}

// ============================================================================
// Destination Flags
// ============================================================================

#[test]
fn test_save_dir_and_name_flags() {
    let dir = create_test_package();
    let out = TempDir::new().unwrap();

    tago(&dir)
        .arg("-d")
        .arg(out.path())
        .args(["-n", "MyTagsFile", "foo.go"])
        .assert()
        .success();

    assert!(out.path().join("MyTagsFile").exists());
    assert!(!dir.path().join("TAGS").exists());
}

#[test]
fn test_append_twice() {
    let dir = create_test_package();

    tago(&dir).arg("foo.go").assert().success();
    let original = fs::read(dir.path().join("TAGS")).unwrap();

    tago(&dir).args(["-a", "shapes.go"]).assert().success();
    let once = fs::read(dir.path().join("TAGS")).unwrap();
    tago(&dir).args(["--append", "shapes.go"]).assert().success();
    let twice = fs::read(dir.path().join("TAGS")).unwrap();

    let added = once.len() - original.len();
    assert_eq!(&once[..original.len()], &original[..]);
    assert_eq!(twice.len(), once.len() + added);
    assert_eq!(&twice[..once.len()], &once[..]);
}

#[test]
fn test_append_without_existing_file_fails() {
    let dir = create_test_package();

    tago(&dir)
        .args(["-a", "foo.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot write tags file"));

    assert!(!dir.path().join("TAGS").exists());
}

// ============================================================================
// Parse Errors
// ============================================================================

#[test]
fn test_parse_error_aborts_and_leaves_destination_untouched() {
    let dir = create_test_package();
    fs::write(dir.path().join("broken.go"), "package demo\n\nfunc Broken( {\n").unwrap();
    fs::write(dir.path().join("TAGS"), "previous contents").unwrap();

    tago(&dir)
        .args(["foo.go", "broken.go", "shapes.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Parsing errors experienced, aborting..."))
        .stderr(predicate::str::contains("broken.go"));

    assert_eq!(
        fs::read_to_string(dir.path().join("TAGS")).unwrap(),
        "previous contents"
    );
}

#[test]
fn test_skip_errors_keeps_valid_files() {
    let dir = create_test_package();
    fs::write(dir.path().join("broken.go"), "package demo\n\nfunc Broken( {\n").unwrap();

    tago(&dir)
        .args(["--skip-errors", "foo.go", "broken.go", "shapes.go"])
        .assert()
        .success()
        .stderr(predicate::str::contains("skipping file"));

    let tags = String::from_utf8(fs::read(dir.path().join("TAGS")).unwrap()).unwrap();
    assert!(tags.contains("\x0c\nfoo.go,"));
    assert!(tags.contains("\x0c\nshapes.go,"));
    assert!(!tags.contains("broken.go"));
}

#[test]
fn test_missing_input_is_not_reported_as_parse_error() {
    let dir = create_test_package();

    tago(&dir)
        .args(["foo.go", "absent.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not read input, aborting..."))
        .stderr(predicate::str::contains("absent.go"))
        .stderr(predicate::str::contains("Parsing errors experienced").not());

    assert!(!dir.path().join("TAGS").exists());
}

#[test]
fn test_file_without_trailing_newline_is_tagged() {
    let dir = create_test_package();
    fs::write(
        dir.path().join("tail.go"),
        "package demo\n\nfunc Tail() {}\n\nvar Last int",
    )
    .unwrap();

    tago(&dir)
        .args(["foo.go", "tail.go", "shapes.go"])
        .assert()
        .success();

    let tags = String::from_utf8(fs::read(dir.path().join("TAGS")).unwrap()).unwrap();
    assert!(tags.contains("\x0c\nfoo.go,"));
    assert!(tags.contains("\x0c\ntail.go,"));
    assert!(tags.contains("func Tail() {}Tail3,6\n"));
    assert!(!tags.contains("Last"));
    assert!(tags.contains("\x0c\nshapes.go,"));
}

#[test]
fn test_nothing_to_tag_aborts() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("empty.go"), "package empty\n").unwrap();

    tago(&dir)
        .arg("empty.go")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no tags were produced"));

    assert!(!dir.path().join("TAGS").exists());
}

#[test]
fn test_missing_file_argument_is_required() {
    let dir = create_test_package();
    tago(&dir).assert().failure();
}

// ============================================================================
// Config File
// ============================================================================

#[test]
fn test_config_file_with_flag_override() {
    let dir = create_test_package();
    fs::write(
        dir.path().join("tago.json"),
        r#"{"tags_name": "FROM_CONFIG", "cache_lines": true}"#,
    )
    .unwrap();

    tago(&dir)
        .args(["-c", "tago.json", "foo.go"])
        .assert()
        .success();
    assert!(dir.path().join("FROM_CONFIG").exists());

    tago(&dir)
        .args(["-c", "tago.json", "-n", "FROM_FLAG", "foo.go"])
        .assert()
        .success();
    assert!(dir.path().join("FROM_FLAG").exists());
}

#[test]
fn test_bad_config_file() {
    let dir = create_test_package();
    fs::write(dir.path().join("tago.json"), "{ nope").unwrap();

    tago(&dir)
        .args(["--config", "tago.json", "foo.go"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config"));
}
