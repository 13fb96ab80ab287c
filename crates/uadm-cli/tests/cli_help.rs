use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("uadm")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("health"))
        .stdout(predicate::str::contains("user-login"))
        .stdout(predicate::str::contains("--api-url"));
}

#[test]
fn test_user_login_requires_username() {
    cargo_bin_cmd!("uadm")
        .arg("user-login")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--username"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("uadm")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("uadm"));
}

#[test]
fn test_console_requires_terminal() {
    let dir = tempfile::tempdir().unwrap();
    cargo_bin_cmd!("uadm")
        .env("UADM_HOME", dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires a terminal"));
}
