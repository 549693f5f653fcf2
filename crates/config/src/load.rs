//! Config loading helpers (env + file + defaults).
//!
//! The loader is responsible for deterministic merge order and surfacing
//! user-facing errors as typed `ErrorEnvelope`s.

use crate::{LoggingConfig, LoggingEnv, ValidatedLoggingConfig, apply_env_overrides};
use fanlog_shared::{ErrorClass, ErrorCode, ErrorEnvelope};
use std::path::Path;

/// Serialization format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON document.
    Json,
    /// TOML document.
    Toml,
}

impl ConfigFormat {
    /// Pick the format from a file extension; missing extensions mean TOML.
    pub fn from_path(path: &Path) -> Result<Self, ErrorEnvelope> {
        let ext = path
            .extension()
            .and_then(|value| value.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            None | Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            Some(other) => Err(ErrorEnvelope::expected(
                ErrorCode::new("config", "unsupported_format"),
                "unsupported config format; use .toml or .json",
            )
            .with_metadata("extension", other.to_string())),
        }
    }
}

/// Load the logging config from sources using a deterministic precedence order.
///
/// Precedence (highest wins):
/// - env overrides (`LoggingEnv`)
/// - config document
/// - defaults (`LoggingConfig::default()`)
pub fn load_config_from_sources(
    config: Option<(&str, ConfigFormat)>,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config = match config {
        None => LoggingConfig::default(),
        Some((input, format)) => parse_config_unvalidated(input, format)?,
    };

    // env is applied last and also validates the resulting config.
    apply_env_overrides(config, env)
}

/// Load the logging config from an optional file path.
pub fn load_config_from_path(
    config_path: Option<&Path>,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config = match config_path {
        None => LoggingConfig::default(),
        Some(path) => {
            let format = ConfigFormat::from_path(path)?;
            let config_text = read_config_file(path)?;
            parse_config_unvalidated(&config_text, format)?
        },
    };

    apply_env_overrides(config, env)
}

/// Load the logging config from std env and an optional file path.
pub fn load_config_std_env(
    config_path: Option<&Path>,
) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let env = LoggingEnv::from_std_env().map_err(ErrorEnvelope::from)?;
    load_config_from_path(config_path, &env)
}

/// Serialize the config as deterministic pretty JSON (with trailing newline).
pub fn to_pretty_json(config: &LoggingConfig) -> Result<String, ErrorEnvelope> {
    let mut output = serde_json::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::internal(),
            format!("failed to serialize config: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    output.push('\n');
    Ok(output)
}

/// Serialize the config as deterministic pretty TOML (with trailing newline).
pub fn to_pretty_toml(config: &LoggingConfig) -> Result<String, ErrorEnvelope> {
    let mut output = toml::to_string_pretty(config).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("config", "serialize_toml"),
            format!("failed to serialize config TOML: {error}"),
            ErrorClass::NonRetriable,
        )
    })?;
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

fn parse_config_unvalidated(
    input: &str,
    format: ConfigFormat,
) -> Result<LoggingConfig, ErrorEnvelope> {
    match format {
        ConfigFormat::Json => serde_json::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_json"),
                format!("invalid config JSON: {error}"),
            )
            .with_metadata("source", "config")
        }),
        ConfigFormat::Toml => toml::from_str(input).map_err(|error| {
            ErrorEnvelope::expected(
                ErrorCode::new("config", "invalid_toml"),
                format!("invalid config TOML: {error}"),
            )
            .with_metadata("source", "config")
        }),
    }
}

fn read_config_file(path: &Path) -> Result<String, ErrorEnvelope> {
    std::fs::read_to_string(path).map_err(|error| {
        let code = match error.kind() {
            std::io::ErrorKind::NotFound => ErrorCode::new("config", "config_file_not_found"),
            std::io::ErrorKind::PermissionDenied => {
                ErrorCode::new("config", "config_file_permission_denied")
            },
            _ => ErrorCode::new("config", "config_file_io"),
        };

        ErrorEnvelope::expected(code, format!("failed to read config file: {error}"))
            .with_metadata("path", path.to_string_lossy().to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::LogFormat;
    use crate::schema::SinkKind;
    use fanlog_domain::Level;
    use std::path::PathBuf;

    #[test]
    fn defaults_apply_without_sources() -> Result<(), ErrorEnvelope> {
        let config = load_config_from_sources(None, &LoggingEnv::default())?;
        assert_eq!(config.as_ref(), &LoggingConfig::default());
        Ok(())
    }

    #[test]
    fn env_wins_over_document() -> Result<(), ErrorEnvelope> {
        let env = LoggingEnv {
            level: Some(Level::Error),
            format: Some(LogFormat::Json),
            ..LoggingEnv::default()
        };
        let config = load_config_from_sources(
            Some((
                r#"{"level":"debug","sinks":[{"kind":"stdout"}]}"#,
                ConfigFormat::Json,
            )),
            &env,
        )?;

        assert_eq!(config.level, Level::Error);
        assert_eq!(
            config.sinks.first().map(|sink| sink.kind),
            Some(SinkKind::JsonStdout)
        );
        Ok(())
    }

    #[test]
    fn format_is_detected_from_extension() {
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("fanlog.toml")).ok(),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("fanlog.JSON")).ok(),
            Some(ConfigFormat::Json)
        );
        let error = ConfigFormat::from_path(&PathBuf::from("fanlog.yaml")).err();
        assert_eq!(
            error.map(|error| error.code),
            Some(ErrorCode::new("config", "unsupported_format"))
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_config_from_path(
            Some(&PathBuf::from("/definitely/not/here.toml")),
            &LoggingEnv::default(),
        )
        .err();
        assert_eq!(
            error.as_ref().map(|error| error.code.clone()),
            Some(ErrorCode::new("config", "config_file_not_found"))
        );
        assert_eq!(
            error.and_then(|error| error.metadata.get("path").cloned()),
            Some("/definitely/not/here.toml".to_string())
        );
    }

    #[test]
    fn pretty_outputs_end_with_newline_and_round_trip() -> Result<(), ErrorEnvelope> {
        let config = LoggingConfig::default();

        let json = to_pretty_json(&config)?;
        assert!(json.ends_with('\n'));
        let toml = to_pretty_toml(&config)?;
        assert!(toml.ends_with('\n'));

        let reparsed = load_config_from_sources(
            Some((&toml, ConfigFormat::Toml)),
            &LoggingEnv::default(),
        )?;
        assert_eq!(reparsed.as_ref(), &config);
        Ok(())
    }
}
