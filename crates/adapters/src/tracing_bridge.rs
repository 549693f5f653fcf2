//! Bridge that re-emits records as `tracing` events.

use fanlog_ports::{HandlerState, Level, LogHandler, LogRecord};

/// Target attached to every bridged event.
pub const TRACING_TARGET: &str = "fanlog";

/// Forwards records to the active `tracing` subscriber.
///
/// `notice` is emitted as `INFO` and `critical` as `ERROR`; the original level
/// is kept in the `level` field.
pub struct TracingHandler {
    state: HandlerState,
    label: Box<str>,
}

impl TracingHandler {
    /// Bridge for logger `label`.
    pub fn new(label: impl Into<Box<str>>) -> Self {
        Self {
            state: HandlerState::default(),
            label: label.into(),
        }
    }

    /// Set the initial threshold.
    #[must_use]
    pub fn with_level(self, level: Level) -> Self {
        self.state.set_level(level);
        self
    }
}

macro_rules! bridge_event {
    ($level:expr, $label:expr, $record:expr) => {
        tracing::event!(
            target: TRACING_TARGET,
            $level,
            label = $label,
            level = $record.level.as_str(),
            metadata = %$record.metadata,
            file = $record.location.file,
            line = $record.location.line,
            "{}",
            $record.message
        )
    };
}

impl LogHandler for TracingHandler {
    fn log(&self, record: LogRecord) {
        let label: &str = &self.label;
        match record.level {
            Level::Trace => bridge_event!(tracing::Level::TRACE, label, record),
            Level::Debug => bridge_event!(tracing::Level::DEBUG, label, record),
            Level::Info | Level::Notice => bridge_event!(tracing::Level::INFO, label, record),
            Level::Warning => bridge_event!(tracing::Level::WARN, label, record),
            Level::Error | Level::Critical => bridge_event!(tracing::Level::ERROR, label, record),
        }
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_domain::{SourceLocation, metadata};
    use std::io;
    use std::sync::{Arc, Mutex, PoisonError};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            let bytes = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn records_become_tracing_events() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let handler = TracingHandler::new("payments");
        tracing::subscriber::with_default(subscriber, || {
            handler.log(LogRecord {
                level: Level::Critical,
                message: "ledger mismatch".to_string(),
                metadata: metadata! { "order" => "42" },
                location: SourceLocation::new("src/ledger.rs", "ledger::check", 9),
            });
        });

        let text = captured.text();
        assert!(text.contains("ERROR"), "{text}");
        assert!(text.contains("fanlog"), "{text}");
        assert!(text.contains("ledger mismatch"), "{text}");
        assert!(text.contains("label=\"payments\""), "{text}");
        assert!(text.contains("level=\"critical\""), "{text}");
        assert!(text.contains("metadata={order=42}"), "{text}");
    }
}
