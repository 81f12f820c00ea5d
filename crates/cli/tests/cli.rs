//! End-to-end checks for flag handling. Nothing here touches the network:
//! usage validation runs before credentials are read, and the credentials
//! check runs before any connection attempt.

use assert_cmd::Command;
use predicates::prelude::*;

fn rax() -> Command {
    Command::cargo_bin("rax").unwrap()
}

#[test]
fn version_flag_prints_the_version() {
    rax()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_env_argument_is_a_parse_error() {
    rax().assert().failure().code(2);
}

#[test]
fn stop_without_force_demands_the_flag() {
    rax()
        .args(["dfw", "--stop", "--nodes", "web-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("must use --force to stop nodes"));
}

#[test]
fn destroy_without_force_demands_the_flag() {
    rax()
        .args(["dfw", "--destroy", "--nodes", "web-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("must use --force to destroy nodes"));
}

#[test]
fn stop_and_destroy_together_are_rejected() {
    rax()
        .args(["dfw", "-s", "-d", "-f", "-n", "web-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("mutually exclusive"));
}

#[test]
fn nodes_without_an_action_are_rejected() {
    rax()
        .args(["dfw", "-n", "web-1"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--stop or --destroy"));
}

#[test]
fn missing_credentials_file_aborts_before_connecting() {
    let home = tempfile::tempdir().unwrap();

    rax()
        .env("HOME", home.path())
        .args(["dfw", "--list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unable to read credentials"));
}
