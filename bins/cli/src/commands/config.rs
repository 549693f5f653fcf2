//! Config command handler.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use clap::ValueEnum;
use fanlog_config::{load_config_std_env, to_pretty_json, to_pretty_toml};
use std::path::Path;

/// Serialization for `fanlog config`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigOutputFormat {
    /// Pretty TOML.
    Toml,
    /// Pretty JSON.
    Json,
}

/// Print the effective config after env overrides.
pub fn run_config(
    config_path: Option<&Path>,
    format: ConfigOutputFormat,
) -> Result<CliOutput, CliError> {
    let config = load_config_std_env(config_path)?;
    let stdout = match format {
        ConfigOutputFormat::Toml => to_pretty_toml(config.as_ref())?,
        ConfigOutputFormat::Json => to_pretty_json(config.as_ref())?,
    };

    Ok(CliOutput {
        stdout,
        stderr: String::new(),
        exit_code: ExitCode::Ok,
    })
}
