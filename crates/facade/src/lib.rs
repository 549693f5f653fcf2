//! # fanlog-facade
//!
//! Process-wide entry points for applications and the CLI.
//!
//! Until [`bootstrap`] runs, [`new_logger`] hands out loggers backed by a
//! stdout [`StreamHandler`] at `info`. Bootstrapping installs a factory once
//! for the whole process; loggers created earlier keep the handler they were
//! built with.
//!
//! This crate depends on `infra`, `app`, and `adapters`.

mod macros;

use fanlog_adapters::StreamHandler;
use fanlog_app::LoggingSystem;
use std::path::Path;
use std::sync::{Arc, LazyLock};

pub use fanlog_app::Logger;
pub use fanlog_config::{LoggingConfig, LoggingEnv, ValidatedLoggingConfig};
pub use fanlog_domain::{
    Level, LogRecord, Metadata, MetadataValue, SourceLocation, metadata, source_location,
};
pub use fanlog_ports::{HandlerFactory, LogHandler, handler_factory};
pub use fanlog_shared::{ErrorCode, ErrorEnvelope, ErrorKind, Result};

static SYSTEM: LazyLock<LoggingSystem> =
    LazyLock::new(|| LoggingSystem::new(default_handler_factory()));

/// Factory used before bootstrap: a stdout stream handler at `info`.
pub fn default_handler_factory() -> HandlerFactory {
    handler_factory(|_label: &str| -> Arc<dyn LogHandler> { Arc::new(StreamHandler::stdout()) })
}

/// Install the process-wide handler factory.
///
/// Only the first call succeeds; later calls return
/// `config:already_bootstrapped` and must be treated as fatal.
pub fn bootstrap(factory: HandlerFactory) -> Result<()> {
    SYSTEM.bootstrap(factory)
}

/// Compose a factory from `config` and install it.
pub fn bootstrap_from_config(config: &ValidatedLoggingConfig) -> Result<()> {
    bootstrap(fanlog_infra::handler_factory(config)?)
}

/// Load config (env > file > defaults), install its factory, and return the
/// effective config.
pub fn bootstrap_from_path(
    config_path: Option<&Path>,
    env: &LoggingEnv,
) -> Result<ValidatedLoggingConfig> {
    let (config, factory) = fanlog_infra::load_handler_factory(config_path, env)?;
    bootstrap(factory)?;
    Ok(config)
}

/// Returns true once [`bootstrap`] has succeeded.
pub fn is_bootstrapped() -> bool {
    SYSTEM.is_bootstrapped()
}

/// Logger for `label` backed by the process-wide factory.
pub fn new_logger(label: impl Into<Box<str>>) -> Logger {
    SYSTEM.make_logger(label)
}

/// Logger for `label` backed by `factory`, independent of bootstrap.
pub fn new_logger_with(label: impl Into<Box<str>>, factory: &HandlerFactory) -> Logger {
    Logger::with_factory(label, factory)
}

/// Returns the facade crate version.
#[must_use]
pub const fn facade_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
