//! Focused CLI argument parsing tests.
//!
//! Tests that verify command-line argument parsing works correctly without
//! touching any input file.

#![allow(deprecated)] // Command::cargo_bin is deprecated but replacement requires newer assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

fn kanon() -> Command {
    let mut cmd = Command::cargo_bin("kanon").unwrap();
    cmd.arg("--no-color");
    cmd
}

#[test]
fn version_command_succeeds() {
    kanon()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kanon"))
        .stdout(predicate::str::contains("Suppression marker"));
}

#[test]
fn version_flag_shows_version() {
    kanon()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kanon"));
}

#[test]
fn help_flag_shows_usage() {
    kanon()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("evaluate"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("classes"));
}

#[test]
fn no_subcommand_fails() {
    kanon().assert().failure();
}

#[test]
fn unknown_subcommand_fails() {
    kanon()
        .arg("anonymize")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn evaluate_requires_file() {
    kanon()
        .arg("evaluate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("required"));
}

#[test]
fn evaluate_help_shows_options() {
    kanon()
        .args(["evaluate", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--qi"))
        .stdout(predicate::str::contains("--output-dir"))
        .stdout(predicate::str::contains("--format"))
        .stdout(predicate::str::contains("--no-write"))
        .stdout(predicate::str::contains("--delimiter"))
        .stdout(predicate::str::contains("--no-header"));
}

#[test]
fn non_integer_k_is_rejected() {
    kanon()
        .args(["evaluate", "data.csv", "-k", "two"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn unknown_output_format_is_rejected() {
    kanon()
        .args(["evaluate", "data.csv", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn multi_character_delimiter_is_rejected() {
    kanon()
        .args(["classify", "data.csv", "--delimiter", ";;"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single character"));
}

#[test]
fn classes_limit_must_be_a_number() {
    kanon()
        .args(["classes", "data.csv", "--limit", "few"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn config_help_lists_subcommands() {
    kanon()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("validate"));
}

#[test]
fn missing_input_file_fails_cleanly() {
    let temp = tempfile::TempDir::new().unwrap();
    kanon()
        .env("HOME", temp.path())
        .env("XDG_CONFIG_HOME", temp.path())
        .current_dir(temp.path())
        .args(["classify", "absent.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
