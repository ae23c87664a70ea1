//! End-to-end tests for the tudu binary
//!
//! Every test points `--config` and `--data-dir` at a temp dir so the user's
//! own tasks are never touched.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn tudu(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tudu").expect("binary should build");
    cmd.arg("--config")
        .arg(dir.path().join("config.toml"))
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .env("NO_COLOR", "1");
    cmd
}

fn stored(dir: &TempDir) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.path().join("data").join("tasks.json"))
        .expect("tasks.json should exist");
    serde_json::from_str(&raw).expect("tasks.json should be valid JSON")
}

#[test]
fn test_list_empty() {
    let dir = TempDir::new().unwrap();

    tudu(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_add_persists_json() {
    let dir = TempDir::new().unwrap();

    tudu(&dir)
        .args(["add", "Buy", "milk"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task added: [0] Buy milk - home"));

    assert_eq!(
        stored(&dir),
        serde_json::json!([{"text": "Buy milk", "category": "home", "completed": false}])
    );
}

#[test]
fn test_add_blank_is_ignored() {
    let dir = TempDir::new().unwrap();

    tudu(&dir)
        .args(["add", "   "])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(!dir.path().join("data").join("tasks.json").exists());
}

#[test]
fn test_add_rejects_unknown_category() {
    let dir = TempDir::new().unwrap();

    tudu(&dir)
        .args(["add", "Mow lawn", "-C", "garden"])
        .assert()
        .failure();
}

#[test]
fn test_scenario_toggle_and_filter() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "Buy milk", "-C", "home"]).assert().success();
    tudu(&dir).args(["add", "Call Bob", "-C", "work"]).assert().success();
    tudu(&dir)
        .args(["toggle", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked task #0 as finished: Buy milk"));

    tudu(&dir)
        .args(["list", "--filter", "finished", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Buy milk").and(predicate::str::contains("Call Bob").not()));

    tudu(&dir)
        .args(["list", "-f", "unfinished", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[ ] [1] Call Bob - work"))
        .stdout(predicate::str::contains("Buy milk").not());
}

#[test]
fn test_unknown_filter_lists_nothing() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "Paint"]).assert().success();
    tudu(&dir)
        .args(["list", "-f", "someday"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_edit_resets_completion() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "old text", "-C", "hobby"]).assert().success();
    tudu(&dir).args(["toggle", "0"]).assert().success();
    tudu(&dir)
        .args(["edit", "0", "X", "-C", "work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated task #0: X - work"));

    assert_eq!(
        stored(&dir),
        serde_json::json!([{"text": "X", "category": "work", "completed": false}])
    );
}

#[test]
fn test_edit_keeps_seeded_text() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "Water plants", "-C", "home"]).assert().success();
    tudu(&dir).args(["edit", "0", "-C", "hobby"]).assert().success();

    assert_eq!(
        stored(&dir),
        serde_json::json!([{"text": "Water plants", "category": "hobby", "completed": false}])
    );
}

#[test]
fn test_delete_and_missing_index() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "a"]).assert().success();
    tudu(&dir).args(["add", "b"]).assert().success();
    tudu(&dir)
        .args(["delete", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed: a"));

    tudu(&dir)
        .args(["remove", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: Task #5 not found"))
        .stderr(predicate::str::contains("TaskNotFound").not());

    assert_eq!(
        stored(&dir),
        serde_json::json!([{"text": "b", "category": "home", "completed": false}])
    );
}

#[test]
fn test_corrupt_store_starts_empty() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    std::fs::create_dir_all(&data).unwrap();
    std::fs::write(data.join("tasks.json"), "{ definitely not a list").unwrap();

    tudu(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No tasks found."));
}

#[test]
fn test_recover_restores_previous_list() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "keep me"]).assert().success();
    tudu(&dir).args(["delete", "0"]).assert().success();
    tudu(&dir)
        .args(["recover", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recovered 1 tasks from backup."));

    assert_eq!(
        stored(&dir),
        serde_json::json!([{"text": "keep me", "category": "home", "completed": false}])
    );
}

#[test]
fn test_recover_without_backup_fails() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "only write"]).assert().success();
    tudu(&dir)
        .args(["recover", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Storage error: Backup file not found",
        ));

    assert_eq!(
        stored(&dir),
        serde_json::json!([{"text": "only write", "category": "home", "completed": false}])
    );
}

#[test]
fn test_categories_counts() {
    let dir = TempDir::new().unwrap();

    tudu(&dir).args(["add", "a", "-C", "work"]).assert().success();
    tudu(&dir).args(["add", "b", "-C", "work"]).assert().success();

    tudu(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::str::contains("Work   2"))
        .stdout(predicate::str::contains("Hobby  0"));
}
