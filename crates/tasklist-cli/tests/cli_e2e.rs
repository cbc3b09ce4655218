use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn tasks(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tasks").unwrap();
    cmd.env_remove("TASKLIST_NAMESPACE")
        .env_remove("TASKLIST_DATA_DIR")
        .env_remove("TASKLIST_DEFAULT_TITLE")
        .env_remove("TASKLIST_LOG")
        .env("NO_COLOR", "1")
        .arg("--data-dir")
        .arg(dir)
        .arg("--namespace")
        .arg("e2e");
    cmd
}

#[test]
fn test_empty_list() {
    let dir = TempDir::new().unwrap();
    tasks(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_add_then_list_in_order() {
    let dir = TempDir::new().unwrap();

    tasks(dir.path())
        .args(["add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: Buy milk"))
        .stdout(predicate::str::contains("Updated:").not());

    tasks(dir.path()).args(["add", "Walk dog"]).assert().success();

    tasks(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("1. [ ] Buy milk"))
        .stdout(predicate::str::contains("2. [ ] Walk dog"))
        .stdout(predicate::str::contains("2 remaining, 0 done"));

    assert!(dir.path().join("e2e.json").exists());
}

#[test]
fn test_add_without_title_uses_placeholder() {
    let dir = TempDir::new().unwrap();
    tasks(dir.path())
        .arg("add")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: New task..."));
}

#[test]
fn test_toggle_and_filters() {
    let dir = TempDir::new().unwrap();
    tasks(dir.path()).args(["add", "A"]).assert().success();
    tasks(dir.path()).args(["add", "B"]).assert().success();

    tasks(dir.path())
        .args(["toggle", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: A (done)"))
        .stdout(predicate::str::contains("1 remaining, 1 done"));

    tasks(dir.path())
        .args(["list", "--done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] A"))
        .stdout(predicate::str::contains("B").not());

    tasks(dir.path())
        .args(["list", "--remaining"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2. [ ] B"))
        .stdout(predicate::str::contains("[x] A").not());
}

#[test]
fn test_rename_to_empty_removes() {
    let dir = TempDir::new().unwrap();
    tasks(dir.path()).args(["add", "A"]).assert().success();

    tasks(dir.path())
        .args(["rename", "1", "Apples"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: Apples"));

    tasks(dir.path())
        .args(["rename", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: Apples"));

    tasks(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_remove_and_clear_done() {
    let dir = TempDir::new().unwrap();
    for title in ["A", "B", "C"] {
        tasks(dir.path()).args(["add", title]).assert().success();
    }

    tasks(dir.path())
        .args(["rm", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: B"));

    tasks(dir.path()).arg("toggle-all").assert().success();
    tasks(dir.path())
        .arg("clear-done")
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: A"))
        .stdout(predicate::str::contains("Removed: C"));

    tasks(dir.path())
        .arg("clear-done")
        .assert()
        .success()
        .stdout(predicate::str::contains("No finished tasks to clear."));
}

#[test]
fn test_bad_position_fails() {
    let dir = TempDir::new().unwrap();
    tasks(dir.path()).args(["add", "A"]).assert().success();

    tasks(dir.path())
        .args(["toggle", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No task at position 5"));
}

#[test]
fn test_invalid_namespace_fails_loudly() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("tasks")
        .unwrap()
        .env_remove("TASKLIST_NAMESPACE")
        .env_remove("TASKLIST_LOG")
        .arg("--data-dir")
        .arg(dir.path())
        .args(["--namespace", "../escape", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_stats() {
    let dir = TempDir::new().unwrap();
    tasks(dir.path()).args(["add", "A"]).assert().success();
    tasks(dir.path())
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 remaining, 0 done"));
}
