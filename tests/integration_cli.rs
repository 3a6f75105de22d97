//! End-to-end tests of the `repobatch` binary.

mod common;

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;

use common::test_helpers::GitFixture;

fn repobatch(fixture: &GitFixture) -> Command {
    let mut command = Command::cargo_bin("repobatch").unwrap();
    command
        .arg("--no-color")
        .arg("-C")
        .arg(fixture.root())
        .env_remove("REPOBATCH_CONFIG")
        .env_remove("REPOBATCH_GIT")
        .env_remove("RUST_LOG");
    command
}

/// Two repositories and a loose file.
fn two_repositories() -> GitFixture {
    let fixture = GitFixture::new();
    fixture.repository("x");
    fixture.repository("y");
    fixture.file("x/a.txt");
    fixture.file("x/b.txt");
    fixture.file("y/c.txt");
    fixture.file("loose.txt");
    fixture
}

fn dry_run_json(fixture: &GitFixture, extra: &[&str]) -> Value {
    let output = repobatch(fixture)
        .args(["--dry-run", "--output", "json"])
        .args(extra)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    Command::cargo_bin("repobatch")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("unstage"))
        .stdout(predicate::str::contains("commit"))
        .stdout(predicate::str::contains("run"));
}

#[test]
fn test_dry_run_groups_by_repository() {
    let fixture = two_repositories();

    let plan = dry_run_json(
        &fixture,
        &["add", "x/a.txt", "y/c.txt", "x/b.txt", "loose.txt"],
    );

    let batches = plan["batches"].as_array().unwrap();
    assert_eq!(batches.len(), 2);
    assert_eq!(
        batches[0]["repo_root"].as_str().unwrap(),
        fixture.root().join("x").to_str().unwrap()
    );
    assert_eq!(batches[0]["paths"].as_array().unwrap().len(), 2);
    assert_eq!(batches[1]["paths"].as_array().unwrap().len(), 1);

    let rejections = plan["rejections"].as_array().unwrap();
    assert_eq!(rejections.len(), 1);
    assert_eq!(rejections[0]["reason"], "missing_repository");
    assert_eq!(
        rejections[0]["path"]["location"].as_str().unwrap(),
        fixture.root().join("loose.txt").to_str().unwrap()
    );
}

#[test]
fn test_config_file_splits_out_of_workspace() {
    let fixture = two_repositories();
    fixture.config(
        "workspace:\n  folders:\n    - name: x\n      uri: x\nclassification:\n  split_out_of_workspace: true\n",
    );

    let plan = dry_run_json(&fixture, &["add", "x/a.txt", "y/c.txt"]);

    assert_eq!(plan["batches"].as_array().unwrap().len(), 1);
    assert_eq!(plan["rejections"][0]["reason"], "out_of_workspace");
}

#[test]
fn test_invalid_config_is_reported() {
    let fixture = two_repositories();
    fixture.config("workspace:\n  folders:\n    - name: \"\"\n      uri: x\n");

    repobatch(&fixture)
        .args(["--dry-run", "add", "x/a.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_missing_git_fails_before_running() {
    let fixture = two_repositories();

    repobatch(&fixture)
        .args(["--git", "/nonexistent/git", "add", "x/a.txt"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Collaborator unavailable"));
}

#[cfg(unix)]
#[test]
fn test_runs_once_per_repository() {
    let fixture = two_repositories();

    repobatch(&fixture)
        .args(["--git", "/bin/echo", "add", "x/a.txt", "y/c.txt", "x/b.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "3 file(s) affected in 2 repository(ies)",
        ));
}

#[cfg(unix)]
#[test]
fn test_failed_batch_sets_exit_status() {
    let fixture = two_repositories();

    repobatch(&fixture)
        .args(["--git", "/bin/sh", "add", "x/a.txt", "loose.txt"])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("1 repository batch(es) failed"))
        .stdout(predicate::str::contains("loose.txt (missing repository)"));
}

#[cfg(unix)]
#[test]
fn test_json_report() {
    let fixture = two_repositories();

    let output = repobatch(&fixture)
        .args([
            "--git",
            "/bin/echo",
            "--output",
            "json",
            "commit",
            "-m",
            "two words",
            "x/a.txt",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let succeeded = report["succeeded"].as_array().unwrap();
    assert_eq!(succeeded.len(), 1);
    assert_eq!(
        succeeded[0]["stdout"].as_str().unwrap(),
        format!(
            "commit -m two words -- {}\n",
            fixture.root().join("x/a.txt").display()
        )
    );
    assert_eq!(report["affected"].as_array().unwrap().len(), 1);
}

#[cfg(unix)]
fn echoed_stdout(fixture: &GitFixture, run_args: &[&str]) -> String {
    let output = repobatch(fixture)
        .args(["--git", "/bin/echo", "--output", "json", "run"])
        .args(run_args)
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["failed"].as_array().unwrap().len(), 0);
    report["succeeded"][0]["stdout"].as_str().unwrap().to_string()
}

#[cfg(unix)]
#[test]
fn test_run_passes_quote_character_through() {
    let fixture = two_repositories();

    let stdout = echoed_stdout(&fixture, &["commit", "-m", "don't break", "--", "x/a.txt"]);

    assert_eq!(
        stdout,
        format!(
            "commit -m don't break {}\n",
            fixture.root().join("x/a.txt").display()
        )
    );
}

#[cfg(unix)]
#[test]
fn test_run_does_not_split_on_semicolon() {
    let fixture = two_repositories();

    let stdout = echoed_stdout(&fixture, &["log", "--grep=a;b", "$HOME", "--", "x/a.txt"]);

    assert_eq!(
        stdout,
        format!(
            "log --grep=a;b $HOME {}\n",
            fixture.root().join("x/a.txt").display()
        )
    );
}
