//! CI workflow-command annotations (`::warning file=..,line=..::message`).

use crate::log_sink::{StdoutLogSink, WriteFailures};
use fanlog_ports::{HandlerState, Level, LogHandler, LogRecord, LogSink};
use std::sync::Arc;

/// Renders records as CI annotation commands.
///
/// `notice`, `warning` and `error` map to the matching annotation kind and
/// `critical` is reported as `error`. Anything below `notice` becomes a
/// `::debug::` line, which CI runners hide unless step debugging is on.
/// The default threshold is `warning`.
pub struct AnnotationHandler {
    state: HandlerState,
    sink: Arc<dyn LogSink>,
    label: Box<str>,
    failures: WriteFailures,
}

impl AnnotationHandler {
    /// Handler for logger `label` writing to `sink`.
    pub fn new(label: impl Into<Box<str>>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: HandlerState::new(Level::Warning),
            sink,
            label: label.into(),
            failures: WriteFailures::default(),
        }
    }

    /// Handler writing to stdout, where CI runners read workflow commands.
    pub fn stdout(label: impl Into<Box<str>>) -> Self {
        Self::new(label, Arc::new(StdoutLogSink))
    }

    /// Set the initial threshold.
    #[must_use]
    pub fn with_level(self, level: Level) -> Self {
        self.state.set_level(level);
        self
    }

    /// Number of lines the sink refused.
    pub fn failed_writes(&self) -> u64 {
        self.failures.count()
    }

    fn render(&self, record: &LogRecord) -> String {
        let message = escape_data(&record.message);
        match annotation_kind(record.level) {
            Some(kind) => format!(
                "::{kind} file={},line={},title={}::{message}",
                escape_property(record.location.file),
                record.location.line,
                escape_property(&self.label),
            ),
            None => format!("::debug::{message}"),
        }
    }
}

impl LogHandler for AnnotationHandler {
    fn log(&self, record: LogRecord) {
        let line = self.render(&record);
        self.failures.write(self.sink.as_ref(), "annotation", &line);
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }
}

const fn annotation_kind(level: Level) -> Option<&'static str> {
    match level {
        Level::Trace | Level::Debug | Level::Info => None,
        Level::Notice => Some("notice"),
        Level::Warning => Some("warning"),
        Level::Error | Level::Critical => Some("error"),
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_domain::{Metadata, SourceLocation};
    use fanlog_testkit::MemorySink;

    fn record(level: Level, message: &str) -> LogRecord {
        LogRecord {
            level,
            message: message.to_string(),
            metadata: Metadata::new(),
            location: SourceLocation::new("src/build.rs", "build::run", 12),
        }
    }

    #[test]
    fn levels_map_to_annotation_kinds() {
        let sink = Arc::new(MemorySink::default());
        let handler = AnnotationHandler::new("build", sink.clone());

        handler.log(record(Level::Notice, "started"));
        handler.log(record(Level::Warning, "slow"));
        handler.log(record(Level::Critical, "failed"));
        handler.log(record(Level::Debug, "detail"));

        assert_eq!(
            sink.take(),
            vec![
                "::notice file=src/build.rs,line=12,title=build::started",
                "::warning file=src/build.rs,line=12,title=build::slow",
                "::error file=src/build.rs,line=12,title=build::failed",
                "::debug::detail",
            ]
        );
    }

    #[test]
    fn messages_and_properties_are_escaped() {
        let sink = Arc::new(MemorySink::default());
        let handler = AnnotationHandler::new("a:b,c", sink.clone());

        handler.log(record(Level::Error, "50% done\nnext"));

        assert_eq!(
            sink.take(),
            vec!["::error file=src/build.rs,line=12,title=a%3Ab%2Cc::50%25 done%0Anext"]
        );
    }

    #[test]
    fn default_threshold_is_warning() {
        let handler = AnnotationHandler::stdout("ci");
        assert_eq!(handler.log_level(), Level::Warning);
        assert_eq!(handler.with_level(Level::Notice).log_level(), Level::Notice);
    }
}
