//! Integration tests for the `strip` command.

mod common;

use common::{check_stderr, check_stdout, contig, temp_file};
use expect_test::expect;
use predicates::prelude::*;
use std::fs;

const SOURCE: &str = "int x = 1; // one\nchar *s = \"/* kept */\"; /* gone\n */\nreturn x;\n";
const STRIPPED: &str = "int x = 1; \nchar *s = \"/* kept */\"; \nreturn x;\n";

// ============================================================================
// Default behavior: stripped output on stdout
// ============================================================================

#[test]
fn strip_stdin_to_stdout() {
    check_stdout(
        &["strip"],
        Some("a\"//not a comment\"b//real comment\nc/*block\nspanning*/d"),
        expect![[r#"
            a"//not a comment"b
            cd"#]],
    );
}

#[test]
fn strip_dash_reads_stdin() {
    contig()
        .args(["strip", "-"])
        .write_stdin(SOURCE)
        .assert()
        .success()
        .stdout(STRIPPED);
}

#[test]
fn strip_file_to_stdout() {
    let file = temp_file(SOURCE);

    contig()
        .args(["strip", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(STRIPPED);

    // Input untouched
    assert_eq!(fs::read_to_string(file.path()).unwrap(), SOURCE);
}

#[test]
fn strip_multiple_files_concatenates() {
    let first = temp_file("a // x\n");
    let second = temp_file("b /* y */\n");

    contig()
        .args([
            "strip",
            first.path().to_str().unwrap(),
            second.path().to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout("a \nb \n");
}

// ============================================================================
// --output flag
// ============================================================================

#[test]
fn strip_output_writes_file() {
    let input = temp_file(SOURCE);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("out.c");

    contig()
        .args([
            "strip",
            input.path().to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert_eq!(fs::read_to_string(&output).unwrap(), STRIPPED);
}

#[test]
fn strip_output_to_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("missing").join("out.c");

    contig()
        .args(["--no-color", "strip", "-o", output.to_str().unwrap()])
        .write_stdin("x")
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("error: "));
}

// ============================================================================
// --write flag
// ============================================================================

#[test]
fn strip_write_modifies_file() {
    let file = temp_file(SOURCE);
    let path = file.path().to_path_buf();

    contig()
        .args(["strip", "--write", path.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("stripped"));

    assert_eq!(fs::read_to_string(&path).unwrap(), STRIPPED);
}

#[test]
fn strip_write_leaves_clean_file_alone() {
    let file = temp_file("int x;\n");

    contig()
        .args(["strip", "--write", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn strip_write_rejects_stdin() {
    check_stderr(
        &["--no-color", "strip", "--write", "-"],
        Some(""),
        expect![[r#"
            error: cannot use --write with stdin
        "#]],
    );
}

// ============================================================================
// --check flag
// ============================================================================

#[test]
fn strip_check_exits_1_when_comments_found() {
    let file = temp_file(SOURCE);

    contig()
        .args(["strip", "--check", file.path().to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("has comments"));
}

#[test]
fn strip_check_exits_0_when_clean() {
    let file = temp_file("char *s = \"// not a comment\";\n");

    contig()
        .args(["strip", "--check", file.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn strip_check_quiet_prints_nothing() {
    contig()
        .args(["strip", "--check", "--quiet"])
        .write_stdin("// x\n")
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn strip_missing_file_reports_and_continues() {
    let good = temp_file("ok // x\n");

    contig()
        .args([
            "strip",
            "/nonexistent/file.c",
            good.path().to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stdout("ok \n")
        .stderr(predicate::str::contains("/nonexistent/file.c"));
}

#[test]
fn strip_errors_are_colored_by_default() {
    contig()
        .args(["strip", "/nonexistent/file.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b["));
}

#[test]
fn strip_no_color_flag() {
    contig()
        .args(["--no-color", "strip", "/nonexistent/file.c"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b[").not());
}

// ============================================================================
// completions
// ============================================================================

#[test]
fn completions_bash_mentions_subcommands() {
    contig()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strip"))
        .stdout(predicate::str::contains("completions"));
}
