//! In-memory log handlers for tests.

use fanlog_ports::{HandlerState, Level, LogHandler, LogRecord};
use std::sync::Mutex;

/// A handler that keeps every record it receives.
///
/// Rendered lines use the plain `"<level>: <message>"` shape, which keeps
/// assertions independent of timestamps.
#[derive(Debug, Default)]
pub struct CapturingHandler {
    state: HandlerState,
    records: Mutex<Vec<LogRecord>>,
}

impl CapturingHandler {
    /// Create a capturing handler with the given threshold.
    pub fn new(level: Level) -> Self {
        Self {
            state: HandlerState::new(level),
            records: Mutex::default(),
        }
    }

    /// Snapshot of captured records, in emission order.
    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    /// Captured records rendered as `"<level>: <message>"`.
    pub fn lines(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|record| format!("{}: {}", record.level, record.message))
            .collect()
    }

    /// Number of captured records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// Returns true when nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drain captured records.
    pub fn take(&self) -> Vec<LogRecord> {
        std::mem::take(&mut *self.records.lock().unwrap())
    }
}

impl LogHandler for CapturingHandler {
    fn log(&self, record: LogRecord) {
        self.records.lock().unwrap().push(record);
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }
}

/// A handler that drops everything.
#[derive(Debug, Default)]
pub struct NoopHandler {
    state: HandlerState,
}

impl LogHandler for NoopHandler {
    fn log(&self, _record: LogRecord) {}

    fn state(&self) -> &HandlerState {
        &self.state
    }
}
