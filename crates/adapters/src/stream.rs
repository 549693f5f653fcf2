//! Plain-text handler: one `<timestamp> <level>: <message>` line per record.

use crate::clock::{SystemClock, format_timestamp};
use crate::log_sink::{StderrLogSink, StdoutLogSink, WriteFailures};
use fanlog_ports::{Clock, HandlerState, Level, LogHandler, LogRecord, LogSink};
use std::fmt::Write as _;
use std::sync::Arc;

/// Text handler writing to a line sink.
///
/// The default line is `<RFC 3339 UTC ms> <level>: <message>`. Label and
/// metadata rendering are opt-in:
///
/// ```text
/// 2024-01-02T03:04:05.678Z info: [payments] charge accepted {order=42}
/// ```
pub struct StreamHandler {
    state: HandlerState,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    label: Option<Box<str>>,
    render_metadata: bool,
    failures: WriteFailures,
}

impl StreamHandler {
    /// Handler writing to `sink` at the default threshold.
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: HandlerState::default(),
            sink,
            clock: Arc::new(SystemClock),
            label: None,
            render_metadata: false,
            failures: WriteFailures::default(),
        }
    }

    /// Handler writing to stdout.
    pub fn stdout() -> Self {
        Self::new(Arc::new(StdoutLogSink))
    }

    /// Handler writing to stderr.
    pub fn stderr() -> Self {
        Self::new(Arc::new(StderrLogSink))
    }

    /// Set the initial threshold.
    #[must_use]
    pub fn with_level(self, level: Level) -> Self {
        self.state.set_level(level);
        self
    }

    /// Replace the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Prefix every message with `[label] `.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<Box<str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Append record metadata as ` {k=v, ...}` when non-empty.
    #[must_use]
    pub const fn with_metadata_rendering(mut self, enabled: bool) -> Self {
        self.render_metadata = enabled;
        self
    }

    /// Number of lines the sink refused.
    pub fn failed_writes(&self) -> u64 {
        self.failures.count()
    }

    fn render(&self, record: &LogRecord) -> String {
        let mut line = format!(
            "{} {}: ",
            format_timestamp(self.clock.now()),
            record.level
        );
        if let Some(label) = &self.label {
            let _ = write!(line, "[{label}] ");
        }
        line.push_str(&record.message);
        if self.render_metadata && !record.metadata.is_empty() {
            let _ = write!(line, " {}", record.metadata);
        }
        line
    }
}

impl LogHandler for StreamHandler {
    fn log(&self, record: LogRecord) {
        let line = self.render(&record);
        self.failures.write(self.sink.as_ref(), "stream", &line);
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }
}
