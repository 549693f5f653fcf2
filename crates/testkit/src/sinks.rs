//! Sinks and clocks with observable, deterministic behavior.

use fanlog_ports::{Clock, LogSink};
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Line sink that stores everything in memory.
///
/// Call [`MemorySink::fail_writes`] to make subsequent writes return an I/O
/// error, which exercises handler failure paths.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
    failing: AtomicBool,
}

impl MemorySink {
    /// Snapshot of written lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }

    /// Drain written lines.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }

    /// Toggle write failures.
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) -> io::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "memory sink closed"));
        }
        self.lines.lock().unwrap().push(line.to_string());
        Ok(())
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: SystemTime,
}

impl FixedClock {
    /// Freeze at `now`.
    pub const fn new(now: SystemTime) -> Self {
        Self { now }
    }

    /// Freeze at a Unix timestamp in milliseconds.
    pub fn from_unix_millis(millis: u64) -> Self {
        Self::new(UNIX_EPOCH + Duration::from_millis(millis))
    }
}

impl Default for FixedClock {
    /// 2024-01-02T03:04:05.678Z
    fn default() -> Self {
        Self::from_unix_millis(1_704_164_645_678)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.now
    }
}
