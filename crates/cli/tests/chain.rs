// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Black-box specs for `relayctl chain`

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

const THREE_STEPS: &str = r#"[
  {"name": "step-fetch", "image": "alpine", "command": ["git", "clone"], "args": ["repo"]},
  {"name": "step-build", "image": "rust", "command": ["cargo"], "args": ["build"],
   "volumeMounts": [{"name": "cache", "mountPath": "/cache"}]},
  {"name": "step-test", "image": "rust", "command": ["cargo", "test"]}
]"#;

fn relayctl() -> Command {
    Command::cargo_bin("relayctl").unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &str) -> String {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.display().to_string()
}

fn chain(args: &[&str]) -> Value {
    let output = relayctl().args(args).assert().success().get_output().clone();
    serde_json::from_slice(&output.stdout).unwrap()
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

#[test]
fn chains_three_steps() {
    let dir = TempDir::new().unwrap();
    let steps = write(&dir, "steps.json", THREE_STEPS);

    let chain = chain(&["chain", "--steps", &steps]);

    assert_eq!(chain["initContainer"]["name"], "place-tools");
    assert_eq!(
        strings(&chain["initContainer"]["command"]),
        vec!["cp", "/ko-app/entrypoint", "/relay/tools/entrypoint"]
    );

    let steps = chain["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    for step in steps {
        assert_eq!(strings(&step["command"]), vec!["/relay/tools/entrypoint"]);
    }
    assert_eq!(
        strings(&steps[0]["args"]),
        vec![
            "-wait_file",
            "/relay/downward/ready",
            "-wait_file_content",
            "-post_file",
            "/relay/tools/0",
            "-entrypoint",
            "git",
            "--",
            "clone",
            "repo",
        ]
    );
    assert_eq!(
        strings(&steps[2]["args"]),
        vec![
            "-wait_file",
            "/relay/tools/1",
            "-post_file",
            "/relay/tools/2",
            "-entrypoint",
            "cargo",
            "--",
            "test",
        ]
    );
    assert_eq!(steps[1]["volumeMounts"][0]["name"], "cache");
    assert_eq!(chain["volumes"].as_array().unwrap().len(), 2);
}

#[test]
fn reads_steps_from_stdin() {
    let output = relayctl()
        .args(["chain", "--steps", "-", "--compact"])
        .write_stdin(THREE_STEPS)
        .assert()
        .success()
        .get_output()
        .clone();

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    let chain: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(chain["steps"].as_array().unwrap().len(), 3);
}

#[test]
fn config_overrides_layout_and_policy() {
    let dir = TempDir::new().unwrap();
    let steps = write(&dir, "steps.json", THREE_STEPS);
    let config = write(
        &dir,
        "relay.toml",
        r#"
[chain]
tools_dir = "/opt/tools"
on_predecessor_failure = "skip"
"#,
    );

    let chain = chain(&["--config", &config, "chain", "--steps", &steps]);

    let args = strings(&chain["steps"][1]["args"]);
    assert!(args.contains(&"/opt/tools/0".to_string()));
    assert!(args.windows(2).any(|w| w == ["-on_predecessor_failure", "skip"]));
    assert_eq!(
        strings(&chain["steps"][1]["command"]),
        vec!["/opt/tools/entrypoint"]
    );
}

#[test]
fn step_without_command_is_rejected() {
    let dir = TempDir::new().unwrap();
    let steps = write(
        &dir,
        "steps.json",
        r#"[{"name": "step-a", "command": ["a"]}, {"name": "step-b", "image": "x"}]"#,
    );

    relayctl()
        .args(["chain", "--steps", &steps])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("step 1 (step-b) has no command"));
}

#[test]
fn empty_step_list_is_rejected() {
    let dir = TempDir::new().unwrap();
    let steps = write(&dir, "steps.json", "[]");

    relayctl()
        .args(["chain", "--steps", &steps])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no steps"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let steps = write(&dir, "steps.json", THREE_STEPS);
    let config = write(&dir, "relay.toml", "[chain]\ntools_dir = \"relative\"\n");

    relayctl()
        .args(["--config", &config, "chain", "--steps", &steps])
        .assert()
        .failure()
        .stderr(predicate::str::contains("chain.tools_dir must be absolute"));
}

#[test]
fn help_lists_commands() {
    relayctl()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chain"))
        .stdout(predicate::str::contains("stop-sidecars"))
        .stdout(predicate::str::contains("ready"));
}
