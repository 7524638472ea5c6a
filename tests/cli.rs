// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 simdeploy contributors

//! Binary smoke tests

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_commands() {
    Command::cargo_bin("simdeploy")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("deploy"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn deploy_with_missing_archive_fails() {
    Command::cargo_bin("simdeploy")
        .unwrap()
        .args(["deploy", "definitely-not-here.ipa"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("archive not found"));
}

#[test]
fn doctor_reports_configured_tools_as_json() {
    let dir = tempfile::TempDir::new().unwrap();
    for tool in ["unzip", "simforge", "codesign", "xcrun"] {
        std::fs::write(dir.path().join(tool), "").unwrap();
    }

    let config = dir.path().join("simdeploy.yaml");
    std::fs::write(
        &config,
        format!(
            "tools:\n  unzip: {d}/unzip\n  converter: {d}/simforge\n  codesign: {d}/codesign\n  xcrun: {d}/xcrun\n",
            d = dir.path().display()
        ),
    )
    .unwrap();

    Command::cargo_bin("simdeploy")
        .unwrap()
        .args(["doctor", "--format", "json", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"converter\""))
        .stdout(predicate::str::contains("\"available\": true"));
}

#[test]
fn doctor_fails_when_converter_is_absent() {
    let dir = tempfile::TempDir::new().unwrap();
    for tool in ["unzip", "codesign", "xcrun"] {
        std::fs::write(dir.path().join(tool), "").unwrap();
    }

    let config = dir.path().join("simdeploy.yaml");
    std::fs::write(
        &config,
        format!(
            "tools:\n  unzip: {d}/unzip\n  converter: {d}/no-such-simforge\n  codesign: {d}/codesign\n  xcrun: {d}/xcrun\n",
            d = dir.path().display()
        ),
    )
    .unwrap();

    Command::cargo_bin("simdeploy")
        .unwrap()
        .args(["doctor", "--config"])
        .arg(&config)
        .assert()
        .failure();
}
