//! Logging configuration schema, defaults, and validation.
//!
//! - Deserialization uses `serde` (TOML or JSON).
//! - Validation returns typed errors mapped to `ErrorEnvelope`.
//! - Base metadata is converted once into the domain `Metadata` type.

use fanlog_domain::{Level, MAX_METADATA_DEPTH, Metadata, MetadataValue};
use fanlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Upper bound on configured sinks.
pub const MAX_SINKS: usize = 16;

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Threshold for sinks that do not set their own.
    pub level: Level,
    /// Base metadata applied to every handler.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, ConfigMetadataValue>,
    /// Output destinations, in forwarding order.
    pub sinks: Vec<SinkConfig>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            level: Level::DEFAULT,
            metadata: BTreeMap::new(),
            sinks: vec![SinkConfig::new(SinkKind::Stdout)],
        }
    }
}

impl LoggingConfig {
    /// Validate the config and resolve base metadata.
    pub fn validate(self) -> Result<ValidatedLoggingConfig, ConfigSchemaError> {
        self.validate_version()?;
        self.validate_sinks()?;
        let metadata = self.base_metadata()?;
        Ok(ValidatedLoggingConfig {
            raw: self,
            metadata,
        })
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }

    fn validate_sinks(&self) -> Result<(), ConfigSchemaError> {
        if self.sinks.is_empty() {
            return Err(ConfigSchemaError::NoSinks);
        }
        if self.sinks.len() > MAX_SINKS {
            return Err(ConfigSchemaError::TooManySinks {
                len: self.sinks.len(),
                max: MAX_SINKS,
            });
        }
        Ok(())
    }

    fn base_metadata(&self) -> Result<Metadata, ConfigSchemaError> {
        let mut metadata = Metadata::new();
        for (key, value) in &self.metadata {
            let trimmed = key.trim();
            if trimmed.is_empty() {
                return Err(ConfigSchemaError::EmptyMetadataKey);
            }
            metadata
                .try_set(trimmed, value.to_metadata_value())
                .map_err(|_| ConfigSchemaError::MetadataTooDeep {
                    key: trimmed.to_string(),
                    max: MAX_METADATA_DEPTH,
                })?;
        }
        Ok(metadata)
    }
}

/// Metadata value as written in a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigMetadataValue {
    /// Plain string.
    String(String),
    /// List of values.
    List(Vec<ConfigMetadataValue>),
    /// Nested table.
    Table(BTreeMap<String, ConfigMetadataValue>),
}

impl ConfigMetadataValue {
    /// Convert into the domain representation.
    pub fn to_metadata_value(&self) -> MetadataValue {
        match self {
            Self::String(value) => MetadataValue::from(value.as_str()),
            Self::List(items) => {
                MetadataValue::Array(items.iter().map(Self::to_metadata_value).collect())
            },
            Self::Table(entries) => MetadataValue::Map(
                entries
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.to_metadata_value()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigMetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// Where and how a sink writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkKind {
    /// Plain text on stdout.
    Stdout,
    /// Plain text on stderr.
    Stderr,
    /// JSON lines on stdout.
    JsonStdout,
    /// JSON lines on stderr.
    JsonStderr,
    /// CI workflow annotations on stdout.
    CiAnnotation,
    /// Events forwarded to the `tracing` subscriber.
    Tracing,
}

impl SinkKind {
    /// Canonical kebab-case name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "stdout",
            Self::Stderr => "stderr",
            Self::JsonStdout => "json-stdout",
            Self::JsonStderr => "json-stderr",
            Self::CiAnnotation => "ci-annotation",
            Self::Tracing => "tracing",
        }
    }

    /// Returns true for sinks that write lines to stdout or stderr.
    pub const fn is_stream(self) -> bool {
        matches!(
            self,
            Self::Stdout | Self::Stderr | Self::JsonStdout | Self::JsonStderr
        )
    }

    /// Returns true for JSON stream sinks.
    pub const fn is_json(self) -> bool {
        matches!(self, Self::JsonStdout | Self::JsonStderr)
    }

    /// Returns true for stream sinks writing to stderr.
    pub const fn is_stderr(self) -> bool {
        matches!(self, Self::Stderr | Self::JsonStderr)
    }

    /// The stream sink with the given format and stream.
    pub const fn stream(json: bool, stderr: bool) -> Self {
        match (json, stderr) {
            (false, false) => Self::Stdout,
            (false, true) => Self::Stderr,
            (true, false) => Self::JsonStdout,
            (true, true) => Self::JsonStderr,
        }
    }
}

/// One configured output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SinkConfig {
    /// Output kind.
    pub kind: SinkKind,
    /// Threshold override; defaults to the top-level level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<Level>,
    /// Append metadata to text lines.
    #[serde(default, skip_serializing_if = "is_false")]
    pub render_metadata: bool,
    /// Prefix text lines with the logger label.
    #[serde(default, skip_serializing_if = "is_false")]
    pub render_label: bool,
}

impl SinkConfig {
    /// Sink of `kind` with defaults.
    pub const fn new(kind: SinkKind) -> Self {
        Self {
            kind,
            level: None,
            render_metadata: false,
            render_label: false,
        }
    }

    /// Threshold for this sink given the config-wide default.
    pub fn effective_level(&self, default: Level) -> Level {
        self.level.unwrap_or(default)
    }
}

#[allow(
    clippy::trivially_copy_pass_by_ref,
    reason = "serde skip_serializing_if passes a reference"
)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Validated config with resolved base metadata.
#[derive(Debug, Clone)]
pub struct ValidatedLoggingConfig {
    raw: LoggingConfig,
    metadata: Metadata,
}

impl ValidatedLoggingConfig {
    /// Base metadata as domain values.
    #[must_use]
    pub const fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Borrow the raw config.
    #[must_use]
    pub const fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }

    /// Consume the wrapper and return the raw config.
    #[must_use]
    pub fn into_inner(self) -> LoggingConfig {
        self.raw
    }
}

impl Deref for ValidatedLoggingConfig {
    type Target = LoggingConfig;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl AsRef<LoggingConfig> for ValidatedLoggingConfig {
    fn as_ref(&self) -> &LoggingConfig {
        &self.raw
    }
}

/// Parse a logging config from a JSON string and validate it.
pub fn parse_logging_config_json(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Parse a logging config from a TOML string and validate it.
pub fn parse_logging_config_toml(input: &str) -> Result<ValidatedLoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate().map_err(Into::into)
}

/// Schema validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// No sinks were configured.
    #[error("at least one sink must be configured")]
    NoSinks,
    /// Too many sinks were configured.
    #[error("too many sinks ({len}, max {max})")]
    TooManySinks {
        /// Number of configured sinks.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
    /// A metadata key was empty after trimming.
    #[error("metadata keys must be non-empty")]
    EmptyMetadataKey,
    /// A metadata value nests deeper than allowed.
    #[error("metadata value for `{key}` nests deeper than {max} levels")]
    MetadataTooDeep {
        /// Offending key.
        key: String,
        /// Maximum nesting depth.
        max: usize,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::NoSinks | Self::TooManySinks { .. } => ErrorCode::new("config", "invalid_sinks"),
            Self::EmptyMetadataKey | Self::MetadataTooDeep { .. } => {
                ErrorCode::new("config", "invalid_metadata")
            },
        }
    }
}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => envelope
                .with_metadata("found", found.to_string())
                .with_metadata("supported", supported.to_string()),
            ConfigSchemaError::TooManySinks { len, max } => envelope
                .with_metadata("len", len.to_string())
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::MetadataTooDeep { key, max } => envelope
                .with_metadata("key", key)
                .with_metadata("max", max.to_string()),
            ConfigSchemaError::NoSinks | ConfigSchemaError::EmptyMetadataKey => envelope,
        }
    }
}
