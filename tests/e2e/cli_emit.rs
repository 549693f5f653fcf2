//! End-to-end tests for `fanlog emit` and `fanlog levels`.

use std::error::Error;
use std::fs;
use std::process::{Command, Output};

const FANLOG_ENV: [&str; 4] = ["FANLOG_LEVEL", "FANLOG_FORMAT", "FANLOG_STREAM", "RUST_LOG"];

fn fanlog(args: &[&str], env: &[(&str, &str)]) -> std::io::Result<Output> {
    let mut command = Command::new(env!("CARGO_BIN_EXE_fanlog"));
    for name in FANLOG_ENV {
        command.env_remove(name);
    }
    command.args(args).envs(env.iter().copied()).output()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn emit_writes_one_text_line_to_stdout() -> Result<(), Box<dyn Error>> {
    let output = fanlog(&["emit", "--level", "warning", "disk low"], &[])?;

    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1, "{lines:?}");
    let line = lines.first().map_or("", String::as_str);
    assert!(line.ends_with(" warning: disk low"), "{line}");
    let timestamp = line.split(' ').next().unwrap_or("");
    assert_eq!(timestamp.len(), "2024-01-02T03:04:05.678Z".len(), "{timestamp}");
    assert!(timestamp.ends_with('Z'), "{timestamp}");
    Ok(())
}

#[test]
fn emit_below_default_threshold_prints_nothing() -> Result<(), Box<dyn Error>> {
    let output = fanlog(&["emit", "--level", "debug", "hidden"], &[])?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    Ok(())
}

#[test]
fn env_level_lowers_the_threshold() -> Result<(), Box<dyn Error>> {
    let output = fanlog(
        &["emit", "--level", "debug", "visible"],
        &[("FANLOG_LEVEL", "debug")],
    )?;

    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 1);
    Ok(())
}

#[test]
fn config_file_selects_json_sink_with_metadata() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("fanlog.toml");
    fs::write(
        &path,
        r#"
version = 1
level = "trace"

[metadata]
service = "api"
apiToken = "abc123"

[[sinks]]
kind = "json-stdout"
"#,
    )?;
    let config = path.to_string_lossy().to_string();

    let output = fanlog(
        &[
            "emit", "--level", "trace", "--label", "orders", "--config", &config, "--meta",
            "region=eu", "warming cache",
        ],
        &[],
    )?;

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let lines = stdout_lines(&output);
    let payload: serde_json::Value =
        serde_json::from_str(lines.first().map_or("", String::as_str))?;
    assert_eq!(payload["level"], "trace");
    assert_eq!(payload["label"], "orders");
    assert_eq!(payload["message"], "warming cache");
    assert_eq!(payload["metadata"]["service"], "api");
    assert_eq!(payload["metadata"]["region"], "eu");
    assert_eq!(payload["metadata"]["apiToken"], "[REDACTED]");
    Ok(())
}

#[test]
fn env_stream_moves_output_to_stderr() -> Result<(), Box<dyn Error>> {
    let output = fanlog(
        &["emit", "--level", "error", "boom"],
        &[("FANLOG_STREAM", "stderr"), ("FANLOG_FORMAT", "json")],
    )?;

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let payload: serde_json::Value = serde_json::from_str(stderr.lines().next().unwrap_or(""))?;
    assert_eq!(payload["message"], "boom");
    Ok(())
}

#[test]
fn invalid_env_exits_with_input_error() -> Result<(), Box<dyn Error>> {
    let output = fanlog(&["emit", "hello"], &[("FANLOG_FORMAT", "yaml")])?;

    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:invalid_env"), "{stderr}");
    assert!(stderr.contains("FANLOG_FORMAT"), "{stderr}");
    Ok(())
}

#[test]
fn missing_config_file_exits_with_input_error() -> Result<(), Box<dyn Error>> {
    let output = fanlog(
        &["emit", "--config", "/definitely/not/here.toml", "hello"],
        &[],
    )?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config:config_file_not_found"), "{stderr}");
    Ok(())
}

#[test]
fn levels_lists_names_in_ascending_order() -> Result<(), Box<dyn Error>> {
    let output = fanlog(&["levels"], &[])?;

    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["trace", "debug", "info", "notice", "warning", "error", "critical"]
    );
    Ok(())
}
