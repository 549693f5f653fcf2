//! Time source used by handlers to stamp records at emission.

use std::time::SystemTime;

/// Wall-clock source.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> SystemTime;
}
