use assert_cmd::Command;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use predicates::prelude::*;
use std::collections::BTreeSet;
use std::path::Path;

fn namescrub(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("namescrub").unwrap();
    cmd.env("HOME", home).env("NO_COLOR", "1").env_remove("NAMESCRUB_LOG");
    cmd
}

fn names(dir: &Path) -> BTreeSet<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

fn set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("namescrub").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Delete or replace a phrase in filenames",
        ));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("namescrub").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("namescrub"));
}

#[test]
fn test_conventional_no_color_value_accepted() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("a (tag).txt").touch().unwrap();

    for value in ["1", "true", ""] {
        let mut cmd = Command::cargo_bin("namescrub").unwrap();
        cmd.env("HOME", home.path())
            .env("NO_COLOR", value)
            .args(["-p", "(tag)", "-m", "delete"])
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("[DRY-RUN] a (tag).txt -> a.txt"))
            .stdout(predicate::str::contains("\u{1b}[").not());
    }
}

#[test]
fn test_dry_run_is_default() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("Title (Source-Library).pdf").touch().unwrap();
    dir.child("Other.pdf").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(Source-Library)", "--mode", "delete"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Scanned 2 file(s) under:"))
        .stdout(predicate::str::contains(
            "[DRY-RUN] Title (Source-Library).pdf -> Title.pdf",
        ))
        .stdout(predicate::str::contains("  Checked files:      2"))
        .stdout(predicate::str::contains("  Matched filenames:  1"))
        .stdout(predicate::str::contains("  Changed (this run): 1"))
        .stdout(predicate::str::contains("This was a dry run."));

    assert_eq!(
        names(dir.path()),
        set(&["Title (Source-Library).pdf", "Other.pdf"])
    );
}

#[test]
fn test_apply_renames() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("Title (Source-Library).pdf").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(Source-Library)", "--mode", "delete", "--apply"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[RENAME] Title (Source-Library).pdf -> Title.pdf",
        ))
        .stdout(predicate::str::contains("dry run").not());

    assert_eq!(names(dir.path()), set(&["Title.pdf"]));
}

#[test]
fn test_loose_matches_dash_variants() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("A (Source\u{2013}Library).pdf").touch().unwrap();
    dir.child("B (Source\u{2014}Library).pdf").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(Source-Library)", "--mode", "delete", "--apply"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No filenames contained the phrase"));

    namescrub(home.path())
        .args(["-p", "(Source-Library)", "--mode", "delete", "--apply", "--loose"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(names(dir.path()), set(&["A.pdf", "B.pdf"]));
}

#[test]
fn test_collision_is_reported_not_fatal() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("Title (tag).pdf").write_str("tagged").unwrap();
    dir.child("Title.pdf").write_str("original").unwrap();

    namescrub(home.path())
        .args(["-p", "(tag)", "-m", "delete", "--apply"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "[SKIP] Target exists: Title.pdf  (from: Title (tag).pdf)",
        ))
        .stdout(predicate::str::contains("  Collisions skipped: 1"));

    dir.child("Title.pdf").assert("original");
    dir.child("Title (tag).pdf").assert("tagged");
}

#[test]
fn test_replace_mode() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("notes (tag).md").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(TAG)", "-i", "-m", "replace", "--replacement", "[done]", "--apply"])
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(names(dir.path()), set(&["notes [done].md"]));
}

#[test]
fn test_recursive() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("top x.txt").touch().unwrap();
    dir.child("sub/inner x.txt").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "x", "-m", "delete", "--apply"])
        .arg(dir.path())
        .assert()
        .success();
    dir.child("sub/inner x.txt").assert(predicate::path::exists());

    namescrub(home.path())
        .args(["-p", "x", "-m", "delete", "--apply", "-r"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("inner x.txt -> "));
    dir.child("sub/inner.txt").assert(predicate::path::exists());
}

#[test]
fn test_list_matches() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("a (tag).txt").touch().unwrap();
    dir.child("b.txt").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(tag)", "-m", "delete", "--list-matches"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[MATCH] a (tag).txt"))
        .stdout(predicate::str::contains("[MATCH] b.txt").not());
}

#[test]
fn test_invalid_target_exit_code() {
    let home = TempDir::new().unwrap();

    namescrub(home.path())
        .args(["-p", "x", "-m", "delete"])
        .arg(home.path().join("missing"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn test_home_directory_refused() {
    let home = TempDir::new().unwrap();
    home.child("a (tag).txt").touch().unwrap();
    let before = names(home.path());

    namescrub(home.path())
        .args(["-p", "(tag)", "-m", "delete", "--apply"])
        .arg(home.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("home directory"))
        .stdout(predicate::str::contains("Scanned").not());

    assert_eq!(names(home.path()), before);
}

#[test]
fn test_home_directory_with_force() {
    let home = TempDir::new().unwrap();
    home.child("a (tag).txt").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(tag)", "-m", "delete", "--apply", "--force"])
        .arg(home.path())
        .assert()
        .success();

    assert_eq!(names(home.path()), set(&["a.txt"]));
}

#[cfg(unix)]
#[test]
fn test_filesystem_root_refused() {
    let home = TempDir::new().unwrap();

    namescrub(home.path())
        .args(["-p", "namescrub-test-phrase", "-m", "delete"])
        .arg("/")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("filesystem root"));
}

#[test]
fn test_json_output() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("a (tag).txt").touch().unwrap();
    dir.child("a.txt").touch().unwrap();
    dir.child("b (tag).txt").touch().unwrap();

    let output = namescrub(home.path())
        .args(["-p", "(tag)", "-m", "delete", "--output", "json"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["operation"], "dry_run");
    assert_eq!(json["summary"]["checked"], 3);
    assert_eq!(json["summary"]["matched"], 2);
    assert_eq!(json["summary"]["changed"], 1);
    assert_eq!(json["summary"]["collisions"], 1);
    assert_eq!(json["entries"][0]["status"], "collision");
    assert_eq!(json["entries"][1]["status"], "previewed");
}

#[test]
fn test_prompts_for_missing_inputs() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("a (tag).txt").touch().unwrap();

    let answers = format!("{}\n\n(tag)\nreplace\n[t]\n", dir.path().display());
    namescrub(home.path())
        .arg("--apply")
        .write_stdin(answers)
        .assert()
        .success()
        .stderr(predicate::str::contains("Enter the directory to scan: "))
        .stderr(predicate::str::contains("Phrase cannot be empty."))
        .stderr(predicate::str::contains("Enter replacement text: "));

    assert_eq!(names(dir.path()), set(&["a [t].txt"]));
}

#[test]
fn test_prompt_tilde_expansion() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.child("a (tag).txt").touch().unwrap();

    namescrub(home.path())
        .args(["-p", "(tag)", "-m", "delete", "--apply"])
        .write_stdin("~/books\n")
        .assert()
        .success();

    assert_eq!(names(dir.path()), set(&["a.txt"]));
}

#[test]
fn test_closed_stdin_fails_cleanly() {
    let home = TempDir::new().unwrap();
    let dir = home.child("books");
    dir.create_dir_all().unwrap();

    namescrub(home.path())
        .arg(dir.path())
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no input available"));
}
