//! Line-oriented output boundary used by text and JSON handlers.

use std::io;

/// A destination that receives fully rendered log lines.
///
/// `line` never contains the trailing newline; sinks append their own
/// terminator. Implementations must keep a single line contiguous when called
/// from several threads.
pub trait LogSink: Send + Sync {
    /// Write one line.
    fn write_line(&self, line: &str) -> io::Result<()>;

    /// Flush buffered output, if any.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }
}
