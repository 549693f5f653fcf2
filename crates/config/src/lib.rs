//! # fanlog-config
//!
//! Logging configuration schema, env overrides, and loading.
//! This crate depends on `domain` and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file + defaults).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_LOG_STREAM, EnvParseError, LogFormat, LogStream,
    LoggingEnv, apply_env_overrides,
};
pub use load::{
    ConfigFormat, load_config_from_path, load_config_from_sources, load_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigMetadataValue, ConfigSchemaError, LoggingConfig, MAX_SINKS,
    SinkConfig, SinkKind, ValidatedLoggingConfig, parse_logging_config_json,
    parse_logging_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
