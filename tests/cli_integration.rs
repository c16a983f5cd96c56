//! Integration tests for the StorePass CLI.
//!
//! These tests exercise the binary end-to-end using `assert_cmd`.
//! Interactive prompts are bypassed via the `STOREPASS_PASSWORD`
//! environment variable, so every test runs non-interactively against a
//! database file in a temp directory.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSWORD: &str = "test-password";

/// Helper: a Command pointing at the storepass binary, wired to a
/// database file under `dir` with a scripted password.
fn storepass(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("storepass").expect("binary should exist");
    cmd.env("STOREPASS_DB", dir.path().join("passwords.db"))
        .env("STOREPASS_PASSWORD", PASSWORD);
    cmd
}

/// Helper: a fresh temp directory with an initialized empty database.
fn init_db() -> TempDir {
    let tmp = TempDir::new().unwrap();
    storepass(&tmp).arg("init").assert().success();
    tmp
}

// ---------------------------------------------------------------------------
// Structural checks
// ---------------------------------------------------------------------------

#[test]
fn help_flag_shows_usage() {
    #[allow(deprecated)]
    Command::cargo_bin("storepass")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Encrypted password database"))
        .stdout(predicate::str::contains("init"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("add"))
        .stdout(predicate::str::contains("edit"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("move"))
        .stdout(predicate::str::contains("dump"))
        .stdout(predicate::str::contains("passwd"));
}

#[test]
fn version_flag_shows_version() {
    #[allow(deprecated)]
    Command::cargo_bin("storepass")
        .unwrap()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("storepass"));
}

#[test]
fn no_args_shows_usage() {
    #[allow(deprecated)]
    Command::cargo_bin("storepass")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_database_file() {
    let tmp = TempDir::new().unwrap();
    storepass(&tmp).arg("init").assert().success();

    let bytes = std::fs::read(tmp.path().join("passwords.db")).unwrap();
    assert_eq!(&bytes[..4], b"rvl\x00");
}

#[test]
fn init_refuses_to_overwrite() {
    let tmp = init_db();
    storepass(&tmp)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// add / list / show
// ---------------------------------------------------------------------------

#[test]
fn add_and_list_roundtrip() {
    let tmp = init_db();

    storepass(&tmp)
        .args(["add", "work", "--entry-type", "folder"])
        .assert()
        .success();
    storepass(&tmp)
        .args([
            "add",
            "work/mail",
            "--field",
            "generic-hostname=mail.example.com",
            "--field",
            "generic-username=alice",
        ])
        .assert()
        .success();

    storepass(&tmp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("work"))
        .stdout(predicate::str::contains("mail"))
        .stdout(predicate::str::contains("mail.example.com"));
}

#[test]
fn show_prints_entry_details() {
    let tmp = init_db();
    storepass(&tmp)
        .args([
            "add",
            "router",
            "--description",
            "admin console",
            "--field",
            "generic-password=hunter2",
        ])
        .assert()
        .success();

    storepass(&tmp)
        .args(["show", "router"])
        .assert()
        .success()
        .stdout(predicate::str::contains("router"))
        .stdout(predicate::str::contains("admin console"))
        .stdout(predicate::str::contains("hunter2"));
}

#[test]
fn add_rejects_unknown_type() {
    let tmp = init_db();
    storepass(&tmp)
        .args(["add", "x", "--entry-type", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn add_rejects_mismatched_field() {
    let tmp = init_db();
    storepass(&tmp)
        .args(["add", "x", "--field", "creditcard-cardnumber=1234"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid"));
}

#[test]
fn add_under_missing_parent_fails() {
    let tmp = init_db();
    storepass(&tmp)
        .args(["add", "nowhere/mail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn add_duplicate_sibling_fails() {
    let tmp = init_db();
    storepass(&tmp).args(["add", "mail"]).assert().success();
    storepass(&tmp)
        .args(["add", "mail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

// ---------------------------------------------------------------------------
// edit / move / delete
// ---------------------------------------------------------------------------

#[test]
fn edit_renames_entry() {
    let tmp = init_db();
    storepass(&tmp).args(["add", "old-name"]).assert().success();
    storepass(&tmp)
        .args(["edit", "old-name", "--rename", "new-name"])
        .assert()
        .success();

    storepass(&tmp)
        .args(["show", "new-name"])
        .assert()
        .success();
    storepass(&tmp)
        .args(["show", "old-name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn move_reorders_siblings() {
    let tmp = init_db();
    for name in ["A", "B", "C"] {
        storepass(&tmp).args(["add", name]).assert().success();
    }
    storepass(&tmp)
        .args(["move", "C", "/", "--position", "0"])
        .assert()
        .success();

    let output = storepass(&tmp).arg("list").assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    let positions: Vec<usize> = ["C", "A", "B"]
        .iter()
        .map(|n| stdout.find(&format!("- {n}")).unwrap())
        .collect();
    assert!(positions[0] < positions[1] && positions[1] < positions[2]);
}

#[test]
fn delete_nonempty_folder_needs_recursive() {
    let tmp = init_db();
    storepass(&tmp)
        .args(["add", "box", "--entry-type", "folder"])
        .assert()
        .success();
    storepass(&tmp).args(["add", "box/inner"]).assert().success();

    storepass(&tmp)
        .args(["delete", "box", "--force"])
        .assert()
        .failure();
    storepass(&tmp)
        .args(["delete", "box", "--recursive", "--force"])
        .assert()
        .success();
    storepass(&tmp)
        .args(["show", "box"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ---------------------------------------------------------------------------
// dump / authentication
// ---------------------------------------------------------------------------

#[test]
fn dump_prints_markup() {
    let tmp = init_db();
    storepass(&tmp)
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<revelationdata dataversion=\"1\">",
        ));
}

#[test]
fn wrong_password_is_rejected() {
    let tmp = init_db();
    storepass(&tmp)
        .env("STOREPASS_PASSWORD", "not-the-password")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Decryption failed"));
}

#[test]
fn file_flag_overrides_env() {
    let tmp = init_db();
    let other = TempDir::new().unwrap();

    storepass(&tmp)
        .args(["--file", other.path().join("alt.db").to_str().unwrap(), "init"])
        .assert()
        .success();
    assert!(other.path().join("alt.db").exists());
}
