//! # fanlog-testkit
//!
//! Test helpers: capturing and no-op handlers, an in-memory sink and a frozen
//! clock.
//! This crate depends on `ports` and `domain`.

pub mod handlers;
pub mod sinks;

pub use handlers::{CapturingHandler, NoopHandler};
pub use sinks::{FixedClock, MemorySink};

/// Returns the testkit crate version.
#[must_use]
pub const fn testkit_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_ports::ports_crate_version;

    #[test]
    fn testkit_can_use_ports() {
        assert!(!testkit_crate_version().is_empty());
        assert!(!ports_crate_version().is_empty());
    }
}
