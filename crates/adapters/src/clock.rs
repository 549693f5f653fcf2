//! Wall clock and timestamp rendering.

use chrono::{DateTime, SecondsFormat, Utc};
use fanlog_ports::Clock;
use std::time::SystemTime;

/// Clock backed by [`SystemTime::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Render `time` as RFC 3339 UTC with millisecond precision,
/// e.g. `2024-01-02T03:04:05.678Z`.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}
