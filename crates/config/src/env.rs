//! Environment variable parsing and env-to-config merging.
//!
//! Env values are read once at the boundary. Parsing is strict: a present but
//! invalid value fails fast instead of being ignored.

use crate::schema::{LoggingConfig, SinkKind, ValidatedLoggingConfig};
use fanlog_domain::Level;
use fanlog_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;

/// Env var: default threshold (`trace` .. `critical`).
pub const ENV_LOG_LEVEL: &str = "FANLOG_LEVEL";
/// Env var: stream sink format (`text` | `json`).
pub const ENV_LOG_FORMAT: &str = "FANLOG_FORMAT";
/// Env var: stream sink destination (`stdout` | `stderr`).
pub const ENV_LOG_STREAM: &str = "FANLOG_STREAM";

const ENV_VARS: [&str; 3] = [ENV_LOG_LEVEL, ENV_LOG_FORMAT, ENV_LOG_STREAM];

/// Line format for stream sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `<timestamp> <level>: <message>` lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Destination for stream sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStream {
    /// Standard output.
    Stdout,
    /// Standard error.
    Stderr,
}

/// Parsed env overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Override for the top-level `level`.
    pub level: Option<Level>,
    /// Rewrites every stream sink to this format.
    pub format: Option<LogFormat>,
    /// Rewrites every stream sink to this destination.
    pub stream: Option<LogStream>,
}

impl LoggingEnv {
    /// Parse env overrides from a key/value map (useful for tests and fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            level: parse_optional(map, ENV_LOG_LEVEL, |value| value.parse().ok())?,
            format: parse_optional(map, ENV_LOG_FORMAT, parse_format)?,
            stream: parse_optional(map, ENV_LOG_STREAM, parse_stream)?,
        })
    }

    /// Parse env overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let map = ENV_VARS
            .into_iter()
            .filter_map(|name| {
                std::env::var(name)
                    .ok()
                    .map(|value| (name.to_string(), value))
            })
            .collect();
        Self::from_map(&map)
    }

    /// Returns true when no override is set.
    pub const fn is_empty(&self) -> bool {
        self.level.is_none() && self.format.is_none() && self.stream.is_none()
    }
}

fn parse_optional<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }
    parse(trimmed)
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}

fn parse_format(value: &str) -> Option<LogFormat> {
    match value.to_ascii_lowercase().as_str() {
        "text" => Some(LogFormat::Text),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}

fn parse_stream(value: &str) -> Option<LogStream> {
    match value.to_ascii_lowercase().as_str() {
        "stdout" => Some(LogStream::Stdout),
        "stderr" => Some(LogStream::Stderr),
        _ => None,
    }
}

/// Apply env overrides to `base` and validate the result.
///
/// `FANLOG_LEVEL` replaces the top-level level only; sinks with an explicit
/// level keep it. `FANLOG_FORMAT` and `FANLOG_STREAM` rewrite stream sinks
/// (stdout, stderr and their JSON variants) and leave other sinks alone.
pub fn apply_env_overrides(
    base: LoggingConfig,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(level) = env.level {
        config.level = level;
    }
    if env.format.is_some() || env.stream.is_some() {
        for sink in config.sinks.iter_mut().filter(|sink| sink.kind.is_stream()) {
            let json = env
                .format
                .map_or(sink.kind.is_json(), |format| format == LogFormat::Json);
            let stderr = env
                .stream
                .map_or(sink.kind.is_stderr(), |stream| stream == LogStream::Stderr);
            sink.kind = SinkKind::stream(json, stderr);
        }
    }

    config.validate().map_err(Into::into)
}

/// Validation failures when parsing env variables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    #[error("{var} must be non-empty")]
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Enum env var had an invalid value.
    #[error("{var} has an unsupported value")]
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let message = error.to_string();
        let envelope = Self::expected(ErrorCode::new("config", "invalid_env"), message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidEnum { var, value } => envelope
                .with_metadata("env_var", var)
                .with_metadata("value", value),
        }
    }
}
