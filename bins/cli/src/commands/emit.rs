//! Emit command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use fanlog_config::LoggingEnv;
use fanlog_facade::{Level, Metadata, bootstrap_from_path, log, new_logger};
use std::path::Path;

/// Inputs for `fanlog emit`.
pub struct EmitCommandInput<'a> {
    pub level: Level,
    pub label: &'a str,
    pub config_path: Option<&'a Path>,
    pub meta: &'a [(String, String)],
    pub message: &'a str,
}

/// Bootstrap from config and emit one record.
///
/// The record itself goes to whatever sinks the config selects; the command
/// output stays empty.
pub fn run_emit(input: &EmitCommandInput<'_>) -> Result<CliOutput, CliError> {
    let env = LoggingEnv::from_std_env().map_err(fanlog_facade::ErrorEnvelope::from)?;
    let config = bootstrap_from_path(input.config_path, &env)?;
    tracing::debug!(
        sinks = config.sinks.len(),
        level = %config.level,
        "logging bootstrapped"
    );

    let mut metadata = Metadata::new();
    for (key, value) in input.meta {
        metadata.set(key.as_str(), value.as_str());
    }

    let logger = new_logger(input.label);
    let message = input.message;
    if metadata.is_empty() {
        log!(logger, input.level, "{message}");
    } else {
        log!(logger, input.level, metadata: &metadata, "{message}");
    }

    Ok(CliOutput {
        stdout: String::new(),
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}

/// Parse a `key=value` pair for `--meta`.
pub fn parse_meta(raw: &str) -> Result<(String, String), String> {
    let Some((key, value)) = raw.split_once('=') else {
        return Err(format!("expected key=value, got `{raw}`"));
    };
    let key = key.trim();
    if key.is_empty() {
        return Err("metadata key must be non-empty".to_string());
    }
    Ok((key.to_string(), value.to_string()))
}
