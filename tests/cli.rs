//
//  upcloud-api
//  tests/cli.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use assert_cmd::Command;
use predicates::prelude::*;

fn upctl() -> Command {
    let mut cmd = Command::cargo_bin("upctl").unwrap();
    cmd.env_remove("UPCLOUD_USERNAME")
        .env_remove("UPCLOUD_PASSWORD")
        .env_remove("UPCLOUD_API_URL")
        .env_remove("UPCLOUD_CONFIG")
        .env_remove("UPCLOUD_DEBUG");
    cmd
}

#[test]
fn help_lists_commands() {
    upctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("server"))
        .stdout(predicate::str::contains("storage"))
        .stdout(predicate::str::contains("permission"));
}

#[test]
fn version_prints_package_version() {
    upctl()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn missing_credentials_is_auth_error() {
    let dir = tempfile::tempdir().unwrap();
    upctl()
        .arg("--config")
        .arg(dir.path().join("config.toml"))
        .args(["server", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("credentials not configured"));
}

#[test]
fn unknown_server_state_is_usage_error() {
    upctl()
        .args(["server", "wait", "00af", "--state", "sleeping"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown server state"));
}

#[test]
fn unreachable_api_is_general_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "username = \"user\"\npassword = \"pass\"\napi_url = \"http://127.0.0.1:9\"\ntimeout = 2\n",
    )
    .unwrap();

    upctl()
        .arg("--config")
        .arg(&config)
        .args(["tag", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn config_set_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    upctl()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "timeout", "30"])
        .assert()
        .success();

    upctl()
        .arg("--config")
        .arg(&config)
        .args(["config", "get", "timeout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("30"));
}

#[test]
fn config_set_rejects_zero_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");

    upctl()
        .arg("--config")
        .arg(&config)
        .args(["config", "set", "timeout", "0"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeout"));

    assert!(!config.exists());
}

#[test]
fn zero_timeout_in_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(
        &config,
        "username = \"user\"\npassword = \"pass\"\ntimeout = 0\n",
    )
    .unwrap();

    upctl()
        .arg("--config")
        .arg(&config)
        .args(["tag", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("timeout must be at least 1 second"));
}
