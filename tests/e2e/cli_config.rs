//! End-to-end tests for `fanlog config`.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn fixture_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../crates/testkit/fixtures")
        .join(relative)
}

fn fanlog(args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fanlog"));
    for name in ["FANLOG_LEVEL", "FANLOG_FORMAT", "FANLOG_STREAM", "RUST_LOG"] {
        command.env_remove(name);
    }
    command.args(args).envs(env.iter().copied()).output()
}

#[test]
fn defaults_print_as_toml() -> Result<(), Box<dyn Error>> {
    let output = fanlog(&["config"], &[])?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("version = 1"), "{stdout}");
    assert!(stdout.contains("level = \"info\""), "{stdout}");
    assert!(stdout.contains("kind = \"stdout\""), "{stdout}");
    Ok(())
}

#[test]
fn output_is_deterministic() -> Result<(), Box<dyn Error>> {
    let config = fixture_path("config/fanlog.valid.toml");
    let config = config.to_string_lossy();
    let first = fanlog(&["config", "--config", &config, "--format", "json"], &[])?;
    let second = fanlog(&["config", "--config", &config, "--format", "json"], &[])?;

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
    Ok(())
}

#[test]
fn env_overrides_show_in_effective_config() -> Result<(), Box<dyn Error>> {
    let config = fixture_path("config/fanlog.valid.toml");
    let output = fanlog(
        &["config", "--config", &config.to_string_lossy(), "--format", "json"],
        &[("FANLOG_LEVEL", "debug"), ("FANLOG_FORMAT", "json")],
    )?;

    assert!(output.status.success());
    let payload: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["level"], "debug");
    assert_eq!(payload["sinks"][0]["kind"], "json-stdout");
    assert_eq!(payload["sinks"][2]["kind"], "ci-annotation");
    assert_eq!(payload["metadata"]["service"], "orders");
    Ok(())
}

#[test]
fn unsupported_version_exits_with_input_error() -> Result<(), Box<dyn Error>> {
    let config = fixture_path("config/fanlog.bad-version.toml");
    let output = fanlog(&["config", "--config", &config.to_string_lossy()], &[])?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:unsupported_version"), "{stderr}");
    Ok(())
}
