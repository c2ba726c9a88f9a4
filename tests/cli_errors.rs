use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use f2c_lib::{ErrorCategory, F2cOutput};

fn bin_path() -> PathBuf {
    std::env::var("CARGO_BIN_EXE_f2c")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            Path::new(env!("CARGO_MANIFEST_DIR"))
                .join("target")
                .join("debug")
                .join(if cfg!(windows) { "f2c.exe" } else { "f2c" })
        })
}

fn run_cmd_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(bin_path());
    cmd.args(args).env_remove("RUST_LOG");
    for (key, val) in env {
        cmd.env(key, val);
    }
    cmd.output().expect("run f2c command")
}

fn expect_error(output: &Output) -> f2c_lib::ErrorOutput {
    assert_eq!(
        output.status.code(),
        Some(2),
        "errors exit with 2; stdout: {}",
        String::from_utf8_lossy(&output.stdout)
    );
    match serde_json::from_slice(&output.stdout).expect("error output should be JSON") {
        F2cOutput::Error(err) => err,
        other => panic!("expected error output, got {other:?}"),
    }
}

#[test]
fn empty_file_key_is_a_validation_error() {
    let output = run_cmd_with_env(&["tokens", "--file", "   "], &[]);
    let err = expect_error(&output);
    assert_eq!(err.error.category, ErrorCategory::Validation);
    assert_eq!(
        err.message.as_deref(),
        Some("Please enter a valid Figma file key.")
    );
}

#[test]
fn invalid_config_is_reported_before_any_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = dir.path().join("f2c.toml");
    std::fs::write(&config, "[figma]\nimage_scale = 9.0\n").unwrap();
    let output = run_cmd_with_env(
        &[
            "generate",
            "--config",
            config.to_str().unwrap(),
            "--file",
            "AbC123xyz",
        ],
        &[("F2C_MOCK_CODE", "<div></div>")],
    );
    let err = expect_error(&output);
    assert_eq!(err.error.category, ErrorCategory::Config);
    assert!(err.error.message.contains("image_scale"));
}

#[test]
fn unreadable_mock_design_fails_the_load() {
    let output = run_cmd_with_env(
        &["tokens", "--file", "AbC123xyz"],
        &[("F2C_MOCK_DESIGN", "/nonexistent/f2c/design.json")],
    );
    let err = expect_error(&output);
    assert_eq!(err.error.category, ErrorCategory::Config);
}

#[test]
fn link_without_file_key_is_rejected() {
    let output = run_cmd_with_env(
        &["prompt", "--file", "https://www.figma.com/community"],
        &[],
    );
    let err = expect_error(&output);
    assert_eq!(err.error.category, ErrorCategory::Validation);
}

#[test]
fn pretty_errors_to_a_pipe_stay_json() {
    let output = run_cmd_with_env(&["tokens", "--file", "", "--format", "pretty"], &[]);
    assert_eq!(output.status.code(), Some(2));
    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("pretty output to a pipe is JSON");
    assert_eq!(value["mode"], "error");
    assert!(value["error"]["remediation"].is_string());
}
