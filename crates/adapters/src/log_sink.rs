//! Line sinks for stdout, stderr and arbitrary writers.

use fanlog_ports::LogSink;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Log sink that writes to stdout.
///
/// The stdout lock is held for the whole line, so concurrent writers never
/// interleave within a line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogSink;

impl LogSink for StdoutLogSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")
    }

    fn flush(&self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Log sink that writes to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(line.as_bytes())?;
        stderr.write_all(b"\n")
    }
}

/// Log sink over any writer, serialized by a mutex.
#[derive(Debug)]
pub struct WriterLogSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterLogSink<W> {
    /// Wrap `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Unwrap the writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterLogSink<W> {
    fn write_line(&self, line: &str) -> io::Result<()> {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")
    }

    fn flush(&self) -> io::Result<()> {
        self.writer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

/// Writes lines to a sink and keeps count of the ones that failed.
///
/// Failures are reported through `tracing` and never propagated; handlers
/// expose the count for diagnostics.
#[derive(Debug, Default)]
pub(crate) struct WriteFailures {
    count: AtomicU64,
}

impl WriteFailures {
    pub(crate) fn write(&self, sink: &dyn LogSink, handler: &'static str, line: &str) {
        if let Err(error) = sink.write_line(line) {
            let failed = self.count.fetch_add(1, Ordering::Relaxed) + 1;
            tracing::warn!(
                target: "fanlog::sink",
                handler,
                failed,
                error = %error,
                "log sink write failed"
            );
        }
    }

    pub(crate) fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}
