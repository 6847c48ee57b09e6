// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::policy::PredecessorFailurePolicy;
use k8s_openapi::api::core::v1::VolumeMount;
use yare::parameterized;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn step(image: &str, command: &[&str], args: &[&str]) -> Container {
    Container {
        name: format!("step-{}", image),
        image: Some(image.to_string()),
        command: Some(strings(command)),
        args: Some(strings(args)),
        ..Default::default()
    }
}

fn user_mount() -> VolumeMount {
    VolumeMount {
        name: "my-mount".to_string(),
        mount_path: "/mount/point".to_string(),
        ..Default::default()
    }
}

#[test]
fn three_steps_are_chained_in_order() {
    let config = Config::default();
    let tools = config.chain.tools_mount();
    let downward = config.chain.downward_mount();

    let mut second = step("step-2", &["cmd1", "cmd2", "cmd3"], &["arg1", "arg2"]);
    second.volume_mounts = Some(vec![user_mount()]);
    let steps = vec![
        step("step-1", &["cmd"], &["arg1", "arg2"]),
        second,
        step("step-3", &["cmd"], &["arg1", "arg2"]),
    ];

    let chain = build_chain(&config, &steps).unwrap();

    let want = vec![
        Container {
            name: "step-step-1".to_string(),
            image: Some("step-1".to_string()),
            command: Some(strings(&["/relay/tools/entrypoint"])),
            args: Some(strings(&[
                "-wait_file",
                "/relay/downward/ready",
                "-wait_file_content",
                "-post_file",
                "/relay/tools/0",
                "-entrypoint",
                "cmd",
                "--",
                "arg1",
                "arg2",
            ])),
            volume_mounts: Some(vec![tools.clone(), downward]),
            ..Default::default()
        },
        Container {
            name: "step-step-2".to_string(),
            image: Some("step-2".to_string()),
            command: Some(strings(&["/relay/tools/entrypoint"])),
            args: Some(strings(&[
                "-wait_file",
                "/relay/tools/0",
                "-post_file",
                "/relay/tools/1",
                "-entrypoint",
                "cmd1",
                "--",
                "cmd2",
                "cmd3",
                "arg1",
                "arg2",
            ])),
            volume_mounts: Some(vec![user_mount(), tools.clone()]),
            ..Default::default()
        },
        Container {
            name: "step-step-3".to_string(),
            image: Some("step-3".to_string()),
            command: Some(strings(&["/relay/tools/entrypoint"])),
            args: Some(strings(&[
                "-wait_file",
                "/relay/tools/1",
                "-post_file",
                "/relay/tools/2",
                "-entrypoint",
                "cmd",
                "--",
                "arg1",
                "arg2",
            ])),
            volume_mounts: Some(vec![tools.clone()]),
            ..Default::default()
        },
    ];
    similar_asserts::assert_eq!(chain.steps, want);

    let want_init = Container {
        name: "place-tools".to_string(),
        image: Some("ghcr.io/relay-dev/entrypoint:latest".to_string()),
        command: Some(strings(&[
            "cp",
            "/ko-app/entrypoint",
            "/relay/tools/entrypoint",
        ])),
        volume_mounts: Some(vec![tools]),
        ..Default::default()
    };
    similar_asserts::assert_eq!(chain.init_container, want_init);
}

#[parameterized(
    single = { 1 },
    pair = { 2 },
    many = { 7 },
)]
fn each_step_waits_on_its_predecessor(count: usize) {
    let config = Config::default();
    let steps: Vec<_> = (0..count)
        .map(|i| step(&format!("img-{}", i), &["run"], &[]))
        .collect();

    let chain = build_chain(&config, &steps).unwrap();
    assert_eq!(chain.steps.len(), count);

    let args: Vec<Vec<String>> = chain
        .steps
        .iter()
        .map(|c| c.args.clone().unwrap())
        .collect();
    let flag_value = |args: &[String], flag: &str| {
        args.iter()
            .position(|a| a == flag)
            .map(|i| args[i + 1].clone())
    };

    for (i, step_args) in args.iter().enumerate() {
        let post = flag_value(step_args, "-post_file").unwrap();
        assert_eq!(post, format!("/relay/tools/{}", i));

        let wait = flag_value(step_args, "-wait_file").unwrap();
        if i == 0 {
            assert_eq!(wait, "/relay/downward/ready");
            assert!(step_args.contains(&"-wait_file_content".to_string()));
        } else {
            assert_eq!(wait, flag_value(&args[i - 1], "-post_file").unwrap());
            assert!(!step_args.contains(&"-wait_file_content".to_string()));
        }
    }
}

#[test]
fn only_first_step_mounts_downward_volume() {
    let config = Config::default();
    let steps = vec![step("a", &["x"], &[]), step("b", &["y"], &[])];
    let chain = build_chain(&config, &steps).unwrap();

    let mount_names = |c: &Container| -> Vec<String> {
        c.volume_mounts
            .iter()
            .flatten()
            .map(|m| m.name.clone())
            .collect()
    };
    assert_eq!(
        mount_names(&chain.steps[0]),
        strings(&["relay-internal-tools", "relay-internal-downward"])
    );
    assert_eq!(mount_names(&chain.steps[1]), strings(&["relay-internal-tools"]));
}

#[test]
fn chain_declares_both_volumes() {
    let chain = build_chain(&Config::default(), &[step("a", &["x"], &[])]).unwrap();
    let names: Vec<_> = chain.volumes.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["relay-internal-tools", "relay-internal-downward"]);
    assert!(chain.volumes[0].empty_dir.is_some());
    assert!(chain.volumes[1].downward_api.is_some());
}

#[test]
fn other_container_fields_are_preserved() {
    let mut original = step("a", &["x"], &[]);
    original.working_dir = Some("/workspace".to_string());
    original.image_pull_policy = Some("Always".to_string());

    let chain = build_chain(&Config::default(), &[original]).unwrap();
    assert_eq!(chain.steps[0].working_dir.as_deref(), Some("/workspace"));
    assert_eq!(chain.steps[0].image_pull_policy.as_deref(), Some("Always"));
    assert_eq!(chain.steps[0].name, "step-a");
}

#[test]
fn missing_args_are_treated_as_empty() {
    let mut original = step("a", &["x", "y"], &[]);
    original.args = None;

    let chain = build_chain(&Config::default(), &[original]).unwrap();
    let args = chain.steps[0].args.clone().unwrap();
    assert_eq!(args[args.len() - 2..].to_vec(), strings(&["--", "y"]));
}

#[test]
fn skip_policy_is_encoded_on_every_step() {
    let mut config = Config::default();
    config.chain.on_predecessor_failure = PredecessorFailurePolicy::Skip;
    let chain = build_chain(&config, &[step("a", &["x"], &[]), step("b", &["y"], &[])]).unwrap();

    for container in &chain.steps {
        let args = container.args.clone().unwrap();
        let at = args
            .iter()
            .position(|a| a == "-on_predecessor_failure")
            .unwrap();
        assert_eq!(args[at + 1], "skip");
    }
}

#[test]
fn custom_poll_interval_is_encoded() {
    let mut config = Config::default();
    config.waiter.poll_interval = std::time::Duration::from_millis(200);
    let chain = build_chain(&config, &[step("a", &["x"], &[])]).unwrap();

    let args = chain.steps[0].args.clone().unwrap();
    assert!(args.windows(2).any(|w| w == ["-wait_poll_interval", "200ms"]));
}

#[test]
fn fractional_poll_interval_is_not_truncated() {
    let mut config = Config::default();
    config.waiter.poll_interval = std::time::Duration::from_micros(2500);
    config.validate().unwrap();
    let chain = build_chain(&config, &[step("a", &["x"], &[])]).unwrap();

    let args = chain.steps[0].args.clone().unwrap();
    let at = args.iter().position(|a| a == "-wait_poll_interval").unwrap();
    assert_eq!(args[at + 1], "2ms 500us");
    assert_eq!(
        humantime::parse_duration(&args[at + 1]).unwrap(),
        config.waiter.poll_interval
    );
}

#[test]
fn default_poll_interval_is_not_encoded() {
    let chain = build_chain(&Config::default(), &[step("a", &["x"], &[])]).unwrap();
    let args = chain.steps[0].args.clone().unwrap();
    assert!(!args.iter().any(|a| a == "-wait_poll_interval"));
}

#[test]
fn custom_layout_flows_through() {
    let mut config = Config::default();
    config.chain.tools_dir = "/t".into();
    config.chain.downward_dir = "/d".into();
    config.chain.ready_file = "go".to_string();

    let chain = build_chain(&config, &[step("a", &["x"], &[])]).unwrap();
    assert_eq!(chain.steps[0].command, Some(strings(&["/t/entrypoint"])));
    let args = chain.steps[0].args.clone().unwrap();
    assert_eq!(args[1], "/d/go");
    assert!(args.contains(&"/t/0".to_string()));
}

#[test]
fn empty_step_list_is_rejected() {
    assert_eq!(build_chain(&Config::default(), &[]), Err(ChainError::NoSteps));
}

#[parameterized(
    missing = { None },
    empty = { Some(vec![]) },
    blank_first = { Some(vec![String::new(), "x".to_string()]) },
)]
fn empty_command_is_rejected(command: Option<Vec<String>>) {
    let mut bad = step("bad", &[], &[]);
    bad.command = command;
    let steps = vec![step("good", &["x"], &[]), bad];

    assert_eq!(
        build_chain(&Config::default(), &steps),
        Err(ChainError::EmptyCommand {
            index: 1,
            name: "step-bad".to_string()
        })
    );
}
