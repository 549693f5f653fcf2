//! Log handler capability: the pluggable sink behind every `Logger`.

use fanlog_domain::{Level, LogRecord, Metadata, MetadataValue};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Mutable threshold and metadata owned by a handler.
///
/// Handlers have reference semantics: every `Logger` bound to the same
/// handler instance observes the same level and metadata, so state lives
/// behind locks and all setters take `&self`. Lock poisoning is ignored; the
/// guarded values are plain data and stay consistent after a panic.
#[derive(Debug, Default)]
pub struct HandlerState {
    level: RwLock<Level>,
    metadata: RwLock<Metadata>,
}

impl HandlerState {
    /// State with the given threshold and empty metadata.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self::with_metadata(level, Metadata::new())
    }

    /// State with the given threshold and metadata.
    #[must_use]
    pub fn with_metadata(level: Level, metadata: Metadata) -> Self {
        Self {
            level: RwLock::new(level),
            metadata: RwLock::new(metadata),
        }
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        *read(&self.level)
    }

    /// Replace the threshold.
    pub fn set_level(&self, level: Level) {
        *write(&self.level) = level;
    }

    /// Snapshot of the stored metadata.
    pub fn metadata(&self) -> Metadata {
        read(&self.metadata).clone()
    }

    /// Replace the stored metadata.
    pub fn set_metadata(&self, metadata: Metadata) {
        *write(&self.metadata) = metadata;
    }

    /// Look up a single metadata entry.
    pub fn metadata_value(&self, key: &str) -> Option<MetadataValue> {
        read(&self.metadata).get(key).cloned()
    }

    /// Set (`Some`) or remove (`None`) a single metadata entry.
    pub fn set_metadata_value(&self, key: &str, value: Option<MetadataValue>) {
        let mut metadata = write(&self.metadata);
        match value {
            Some(value) => metadata.set(key, value),
            None => {
                metadata.remove(key);
            },
        }
    }

    /// Stored metadata with `overrides` merged over it.
    pub fn merged_metadata(&self, overrides: Option<&Metadata>) -> Metadata {
        let stored = read(&self.metadata);
        match overrides {
            Some(overrides) if !overrides.is_empty() => Metadata::merge(&stored, overrides),
            _ => stored.clone(),
        }
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Boundary contract for log output.
///
/// Implementations decide formatting, destination and buffering. `log` must
/// never fail outward: write errors are swallowed, retried, or reported by the
/// handler itself. The level/metadata accessors default to the handler's
/// [`HandlerState`].
pub trait LogHandler: Send + Sync {
    /// Emit a record that already passed the logger's threshold.
    fn log(&self, record: LogRecord);

    /// Level and metadata storage for this handler.
    fn state(&self) -> &HandlerState;

    /// Current threshold.
    fn log_level(&self) -> Level {
        self.state().level()
    }

    /// Replace the threshold.
    fn set_log_level(&self, level: Level) {
        self.state().set_level(level);
    }

    /// Snapshot of the handler metadata.
    fn metadata(&self) -> Metadata {
        self.state().metadata()
    }

    /// Replace the handler metadata.
    fn set_metadata(&self, metadata: Metadata) {
        self.state().set_metadata(metadata);
    }

    /// Look up a single metadata entry.
    fn metadata_value(&self, key: &str) -> Option<MetadataValue> {
        self.state().metadata_value(key)
    }

    /// Set (`Some`) or remove (`None`) a single metadata entry.
    fn set_metadata_value(&self, key: &str, value: Option<MetadataValue>) {
        self.state().set_metadata_value(key, value);
    }

    /// Handler metadata with call-site metadata merged over it.
    fn merged_metadata(&self, call_site: Option<&Metadata>) -> Metadata {
        self.state().merged_metadata(call_site)
    }
}

impl fmt::Debug for dyn LogHandler {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LogHandler")
            .field("log_level", &self.log_level())
            .finish_non_exhaustive()
    }
}

/// Builds one handler per logger label.
pub type HandlerFactory = Arc<dyn Fn(&str) -> Arc<dyn LogHandler> + Send + Sync>;

/// Wrap a closure as a [`HandlerFactory`].
pub fn handler_factory<F>(factory: F) -> HandlerFactory
where
    F: Fn(&str) -> Arc<dyn LogHandler> + Send + Sync + 'static,
{
    Arc::new(factory)
}
