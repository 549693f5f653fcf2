//! Structured JSON handler emitting one object per line.

use crate::clock::{SystemClock, format_timestamp};
use crate::log_sink::{StderrLogSink, StdoutLogSink, WriteFailures};
use fanlog_domain::{MAX_METADATA_DEPTH, MetadataValue, TRUNCATED};
use fanlog_ports::{Clock, HandlerState, Level, LogHandler, LogRecord, LogSink, Metadata};
use fanlog_shared::redaction::{REDACTED, is_secret_key};
use serde_json::{Map, Value};
use std::sync::Arc;

const SERIALIZE_FAILED_LINE: &str = "{\"timestamp\":null,\"level\":\"error\",\"label\":\"fanlog\",\"message\":\"log serialization failed\"}";

/// JSON handler writing to a line sink.
///
/// Each line carries `timestamp`, `level`, `label`, `message`, `source` and,
/// when non-empty, `metadata`. Metadata keys that look like credentials are
/// replaced with `[REDACTED]` at every nesting level.
pub struct JsonHandler {
    state: HandlerState,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    label: Box<str>,
    failures: WriteFailures,
}

impl JsonHandler {
    /// Handler for logger `label` writing to `sink`.
    pub fn new(label: impl Into<Box<str>>, sink: Arc<dyn LogSink>) -> Self {
        Self {
            state: HandlerState::default(),
            sink,
            clock: Arc::new(SystemClock),
            label: label.into(),
            failures: WriteFailures::default(),
        }
    }

    /// Handler writing to stdout.
    pub fn stdout(label: impl Into<Box<str>>) -> Self {
        Self::new(label, Arc::new(StdoutLogSink))
    }

    /// Handler writing to stderr.
    pub fn stderr(label: impl Into<Box<str>>) -> Self {
        Self::new(label, Arc::new(StderrLogSink))
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

    /// Number of lines the sink refused.
    pub fn failed_writes(&self) -> u64 {
        self.failures.count()
    }

    fn payload(&self, record: &LogRecord) -> Value {
        let mut payload = Map::new();
        payload.insert(
            "timestamp".to_string(),
            Value::String(format_timestamp(self.clock.now())),
        );
        payload.insert(
            "level".to_string(),
            Value::String(record.level.as_str().to_string()),
        );
        payload.insert("label".to_string(), Value::String(self.label.to_string()));
        payload.insert("message".to_string(), Value::String(record.message.clone()));
        if !record.metadata.is_empty() {
            payload.insert("metadata".to_string(), metadata_to_json(&record.metadata, 0));
        }
        let mut source = Map::new();
        source.insert(
            "file".to_string(),
            Value::String(record.location.file.to_string()),
        );
        source.insert(
            "function".to_string(),
            Value::String(record.location.function.to_string()),
        );
        source.insert("line".to_string(), Value::from(record.location.line));
        payload.insert("source".to_string(), Value::Object(source));
        Value::Object(payload)
    }
}

impl LogHandler for JsonHandler {
    fn log(&self, record: LogRecord) {
        let line = serde_json::to_string(&self.payload(&record)).unwrap_or_else(|error| {
            tracing::warn!(target: "fanlog::json", error = %error, "log serialization failed");
            SERIALIZE_FAILED_LINE.to_string()
        });
        self.failures.write(self.sink.as_ref(), "json", &line);
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }
}

fn metadata_to_json(metadata: &Metadata, depth: usize) -> Value {
    let mut map = Map::new();
    for (key, value) in metadata.iter() {
        let rendered = if is_secret_key(key) {
            Value::String(REDACTED.to_string())
        } else {
            value_to_json(value, depth)
        };
        map.insert(key.to_string(), rendered);
    }
    Value::Object(map)
}

fn value_to_json(value: &MetadataValue, depth: usize) -> Value {
    match value {
        MetadataValue::String(text) => Value::String(text.to_string()),
        MetadataValue::Array(_) | MetadataValue::Map(_) if depth >= MAX_METADATA_DEPTH => {
            Value::String(TRUNCATED.to_string())
        },
        MetadataValue::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| value_to_json(item, depth + 1))
                .collect(),
        ),
        MetadataValue::Map(nested) => metadata_to_json(nested, depth + 1),
    }
}
