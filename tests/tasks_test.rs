//! End-to-end tests for task templating and execution.
// The cargo_bin function is marked deprecated in favor of cargo_bin! macro,
// but both work correctly. Suppressing until assert_cmd stabilizes the new API.
#![allow(deprecated)]
#![cfg(unix)]

use assert_cmd::cargo::cargo_bin;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const TASKS_CONFIG: &str = r#"
[tasks.test-with-args]
run = 'echo "{{arg()}} {{flag(name="force")}} {{option(name="user")}}"'

[tasks.test-with-defaults]
run = 'echo {{arg(name="first", default="arg1")}} {{option(name="user", default="user1")}}'
description = "Echo with defaults"

[tasks.greet]
run = ["echo hello", "echo"]

[tasks.build]
run = "echo build"
depends = ["lint"]

[tasks.lint]
run = "echo lint"

[tasks.loop-a]
run = "echo a"
depends = ["loop-b"]

[tasks.loop-b]
run = "echo b"
depends = ["loop-a"]

[tasks.fail]
run = "exit 7"

[tasks.v]
run = 'echo "{{flag(name="verbose")}} {{arg(default="x")}}"'

[tasks.t]
run = 'echo "{{arg()}} {{flag(name="force")}}"'

[tasks.q]
run = 'echo "{{option(name="project")}}"'
"#;

fn setup_project(config: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("toolpin.toml"), config).unwrap();
    temp
}

fn toolpin(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("toolpin"));
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .env_remove("TOOLPIN_VERBOSE")
        .env("TOOLPIN_DATA_DIR", temp.path().join("data"))
        .env("TOOLPIN_GLOBAL_CONFIG_FILE", temp.path().join("global.toml"))
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn args_flags_and_options_are_substituted() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "test-with-args", "foo", "--force", "--user=user"])
        .assert()
        .success()
        .stdout("foo true user\n");
}

#[test]
fn defaults_apply_when_arguments_are_omitted() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "test-with-defaults"])
        .assert()
        .success()
        .stdout("arg1 user1\n");
}

#[test]
fn supplied_arguments_override_defaults() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "test-with-defaults", "arg2", "--user=user2"])
        .assert()
        .success()
        .stdout("arg2 user2\n");
}

#[test]
fn leftover_arguments_go_to_last_line() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "greet", "world"])
        .assert()
        .success()
        .stdout("hello\nworld\n");
}

#[test]
fn dependencies_run_first() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "build"])
        .assert()
        .success()
        .stdout("lint\nbuild\n");
}

#[test]
fn verbose_shows_commands_on_stderr() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["--verbose", "run", "lint"])
        .assert()
        .success()
        .stdout("lint\n")
        .stderr(predicate::str::contains("$ echo lint"));
}

#[test]
fn circular_dependencies_are_rejected() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "loop-a"])
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("loop-a -> loop-b -> loop-a"));
}

#[test]
fn failing_task_propagates_exit_code() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp).args(["run", "fail"]).assert().code(7);
}

#[test]
fn unknown_task_fails() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope"));
}

#[test]
fn task_flag_named_like_global_flag_reaches_task() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "v", "--verbose"])
        .assert()
        .success()
        .stdout("true x\n")
        .stderr(predicate::str::contains("$ echo").not());
}

#[test]
fn arguments_after_separator_are_positional() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "t", "--", "--force"])
        .assert()
        .success()
        .stdout("--force false\n");
}

#[test]
fn task_option_named_like_global_option_reaches_task() {
    let temp = setup_project(TASKS_CONFIG);
    toolpin(&temp)
        .args(["run", "q", "--project=web"])
        .assert()
        .success()
        .stdout("web\n");
}

#[test]
fn tasks_ls_lists_names_and_descriptions() {
    let temp = setup_project(TASKS_CONFIG);
    let output = toolpin(&temp).args(["tasks", "ls"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    insta::assert_snapshot!(stdout.trim_end(), @r###"
    build
    fail
    greet
    lint
    loop-a
    loop-b
    q
    t
    test-with-args
    test-with-defaults  Echo with defaults
    v
    "###);
}
