//! One-shot installation of the process-wide handler factory.

use crate::Logger;
use fanlog_ports::HandlerFactory;
use fanlog_shared::{ErrorCode, ErrorEnvelope, Result};
use std::fmt;
use std::sync::OnceLock;

/// Holds the handler factory used by loggers created without an explicit one.
///
/// The slot starts empty and can be filled exactly once. Until then
/// [`LoggingSystem::factory`] returns the default factory given at
/// construction. The facade keeps a single process-wide instance; tests build
/// their own.
pub struct LoggingSystem {
    installed: OnceLock<HandlerFactory>,
    fallback: HandlerFactory,
}

impl LoggingSystem {
    /// Create an unbootstrapped system that falls back to `fallback`.
    pub fn new(fallback: HandlerFactory) -> Self {
        Self {
            installed: OnceLock::new(),
            fallback,
        }
    }

    /// Install `factory` as the process-wide default.
    ///
    /// The first call wins, including under concurrent races. Every later call
    /// fails with `config:already_bootstrapped` and leaves the installed
    /// factory in place.
    pub fn bootstrap(&self, factory: HandlerFactory) -> Result<()> {
        match self.installed.set(factory) {
            Ok(()) => {
                tracing::debug!(target: "fanlog::bootstrap", "handler factory installed");
                Ok(())
            },
            Err(_rejected) => {
                tracing::warn!(
                    target: "fanlog::bootstrap",
                    "handler factory already installed; bootstrap rejected"
                );
                Err(ErrorEnvelope::invariant(
                    ErrorCode::already_bootstrapped(),
                    "logging system can only be bootstrapped once",
                ))
            },
        }
    }

    /// Returns true once a factory has been installed.
    pub fn is_bootstrapped(&self) -> bool {
        self.installed.get().is_some()
    }

    /// The installed factory, or the fallback when none was installed.
    pub fn factory(&self) -> &HandlerFactory {
        self.installed.get().unwrap_or(&self.fallback)
    }

    /// Build a logger from the current factory.
    pub fn make_logger(&self, label: impl Into<Box<str>>) -> Logger {
        Logger::with_factory(label, self.factory())
    }
}

impl fmt::Debug for LoggingSystem {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoggingSystem")
            .field("bootstrapped", &self.is_bootstrapped())
            .finish_non_exhaustive()
    }
}
