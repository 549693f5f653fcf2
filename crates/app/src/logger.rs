//! Logger facade: labeled, leveled emission through a shared handler.

use fanlog_domain::{Level, LogRecord, Metadata, MetadataValue, SourceLocation};
use fanlog_ports::{HandlerFactory, LogHandler};
use std::sync::Arc;

/// Labeled entry point for emitting records.
///
/// A `Logger` is cheap to clone. Clones share the handler and copy the level
/// override, so changing the override on one clone leaves the others alone
/// while handler metadata and threshold changes are visible to all of them.
#[derive(Debug, Clone)]
pub struct Logger {
    label: Box<str>,
    handler: Arc<dyn LogHandler>,
    level_override: Option<Level>,
}

impl Logger {
    /// Build a logger whose handler comes from `factory`.
    pub fn with_factory(label: impl Into<Box<str>>, factory: &HandlerFactory) -> Self {
        let label = label.into();
        let handler = factory(&label);
        Self {
            label,
            handler,
            level_override: None,
        }
    }

    /// Build a logger bound to an existing handler.
    pub fn with_handler(label: impl Into<Box<str>>, handler: Arc<dyn LogHandler>) -> Self {
        Self {
            label: label.into(),
            handler,
            level_override: None,
        }
    }

    /// Label given at construction.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The handler this logger emits through.
    #[must_use]
    pub const fn handler(&self) -> &Arc<dyn LogHandler> {
        &self.handler
    }

    /// Effective threshold: the override when set, the handler's otherwise.
    pub fn log_level(&self) -> Level {
        self.level_override
            .unwrap_or_else(|| self.handler.log_level())
    }

    /// Override the threshold for this logger only.
    pub const fn set_log_level(&mut self, level: Level) {
        self.level_override = Some(level);
    }

    /// Drop the override and fall back to the handler's threshold.
    pub const fn clear_log_level(&mut self) {
        self.level_override = None;
    }

    /// Returns true when a record at `level` would reach the handler.
    pub fn is_enabled(&self, level: Level) -> bool {
        level.is_at_least(self.log_level())
    }

    /// Read one entry of the handler metadata.
    pub fn metadata_value(&self, key: &str) -> Option<MetadataValue> {
        self.handler.metadata_value(key)
    }

    /// Set or remove one entry of the handler metadata.
    ///
    /// This writes through to the shared handler, so every logger bound to it
    /// sees the change.
    pub fn set_metadata_value(&self, key: &str, value: Option<MetadataValue>) {
        self.handler.set_metadata_value(key, value);
    }

    /// Filter, merge metadata, and forward one record.
    ///
    /// `message` is only evaluated when `level` passes the threshold.
    pub fn log<F, M>(
        &self,
        level: Level,
        message: F,
        metadata: Option<&Metadata>,
        location: SourceLocation,
    ) where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        if !self.is_enabled(level) {
            return;
        }
        let record = LogRecord {
            level,
            message: message().into(),
            metadata: self.handler.merged_metadata(metadata),
            location,
        };
        self.handler.log(record);
    }

    /// Emit at [`Level::Trace`].
    #[track_caller]
    pub fn trace<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Trace, message, metadata, SourceLocation::caller());
    }

    /// Emit at [`Level::Debug`].
    #[track_caller]
    pub fn debug<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Debug, message, metadata, SourceLocation::caller());
    }

    /// Emit at [`Level::Info`].
    #[track_caller]
    pub fn info<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Info, message, metadata, SourceLocation::caller());
    }

    /// Emit at [`Level::Notice`].
    #[track_caller]
    pub fn notice<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Notice, message, metadata, SourceLocation::caller());
    }

    /// Emit at [`Level::Warning`].
    #[track_caller]
    pub fn warning<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Warning, message, metadata, SourceLocation::caller());
    }

    /// Emit at [`Level::Error`].
    #[track_caller]
    pub fn error<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Error, message, metadata, SourceLocation::caller());
    }

    /// Emit at [`Level::Critical`].
    #[track_caller]
    pub fn critical<F, M>(&self, message: F, metadata: Option<&Metadata>)
    where
        F: FnOnce() -> M,
        M: Into<String>,
    {
        self.log(Level::Critical, message, metadata, SourceLocation::caller());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_domain::metadata;
    use fanlog_ports::{HandlerState, handler_factory};
    use std::cell::Cell;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording {
        state: HandlerState,
        records: Mutex<Vec<LogRecord>>,
    }

    impl Recording {
        fn lines(&self) -> Vec<String> {
            self.records
                .lock()
                .map(|records| {
                    records
                        .iter()
                        .map(|record| format!("{}: {}", record.level, record.message))
                        .collect()
                })
                .unwrap_or_default()
        }

        fn last(&self) -> Option<LogRecord> {
            self.records
                .lock()
                .ok()
                .and_then(|records| records.last().cloned())
        }
    }

    impl LogHandler for Recording {
        fn log(&self, record: LogRecord) {
            if let Ok(mut records) = self.records.lock() {
                records.push(record);
            }
        }

        fn state(&self) -> &HandlerState {
            &self.state
        }
    }

    fn logger_with(label: &str) -> (Logger, Arc<Recording>) {
        let handler = Arc::new(Recording::default());
        let shared: Arc<dyn LogHandler> = handler.clone();
        (Logger::with_handler(label, shared), handler)
    }

    #[test]
    fn threshold_discards_lower_levels_and_forwards_the_rest() {
        let (mut logger, handler) = logger_with("svc");
        logger.set_log_level(Level::Warning);

        logger.info(|| "dropped", None);
        logger.warning(|| "kept", None);
        logger.critical(|| "also kept", None);

        assert_eq!(handler.lines(), vec!["warning: kept", "critical: also kept"]);
    }

    #[test]
    fn filtered_records_never_evaluate_the_message() {
        let (logger, handler) = logger_with("svc");
        let evaluated = Cell::new(false);

        logger.debug(
            || {
                evaluated.set(true);
                "expensive"
            },
            None,
        );

        assert!(!evaluated.get());
        assert!(handler.lines().is_empty());
    }

    #[test]
    fn trace_override_emits_trace_and_error_lines() {
        let (mut logger, handler) = logger_with("svc");
        logger.set_log_level(Level::Trace);

        logger.trace(|| "a", None);
        logger.error(|| "b", None);

        assert_eq!(handler.lines(), vec!["trace: a", "error: b"]);
    }

    #[test]
    fn effective_level_falls_back_to_the_handler() {
        let (mut logger, handler) = logger_with("svc");
        assert_eq!(logger.log_level(), Level::Info);

        handler.set_log_level(Level::Error);
        assert_eq!(logger.log_level(), Level::Error);

        logger.set_log_level(Level::Debug);
        assert_eq!(logger.log_level(), Level::Debug);
        assert_eq!(handler.log_level(), Level::Error);

        logger.clear_log_level();
        assert_eq!(logger.log_level(), Level::Error);
    }

    #[test]
    fn call_site_metadata_overrides_handler_metadata() {
        let (logger, handler) = logger_with("svc");
        handler.set_metadata(metadata! { "a" => "1", "b" => "2" });

        logger.info(|| "hello", Some(&metadata! { "b" => "3", "c" => "4" }));

        let record = handler.last();
        assert_eq!(
            record.map(|record| record.metadata),
            Some(metadata! { "a" => "1", "b" => "3", "c" => "4" })
        );
        assert_eq!(handler.metadata(), metadata! { "a" => "1", "b" => "2" });
    }

    #[test]
    fn per_level_methods_capture_the_call_site() {
        let (logger, handler) = logger_with("svc");
        let line = line!() + 1;
        logger.notice(|| "here", None);

        let location = handler.last().map(|record| record.location);
        assert_eq!(location.map(|location| location.line), Some(line));
        assert!(location.is_some_and(|location| location.file.ends_with("logger.rs")));
    }

    #[test]
    fn loggers_sharing_a_handler_see_metadata_writes() {
        let (first, _handler) = logger_with("a");
        let second = Logger::with_handler("b", Arc::clone(first.handler()));

        first.set_metadata_value("request", Some("42".into()));
        assert_eq!(second.metadata_value("request"), Some("42".into()));
    }

    #[test]
    fn clones_share_handler_but_not_override() {
        let (mut logger, handler) = logger_with("svc");
        let clone = logger.clone();
        logger.set_log_level(Level::Critical);

        clone.info(|| "from clone", None);
        logger.info(|| "from original", None);

        assert_eq!(handler.lines(), vec!["info: from clone"]);
        assert_eq!(clone.label(), "svc");
    }

    #[test]
    fn factory_receives_the_label() {
        let factory = handler_factory(|label| {
            let handler: Arc<dyn LogHandler> = Arc::new(Recording::default());
            handler.set_metadata_value("label", Some(label.into()));
            handler
        });

        let logger = Logger::with_factory("payments", &factory);
        assert_eq!(logger.label(), "payments");
        assert_eq!(logger.metadata_value("label"), Some("payments".into()));
    }
}
