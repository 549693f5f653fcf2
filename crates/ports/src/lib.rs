//! # fanlog-ports
//!
//! Boundary traits between the logging facade and its outputs:
//!
//! - [`LogHandler`] - the pluggable sink capability every `Logger` binds to
//! - [`LogSink`] - line-oriented destination used by rendering handlers
//! - [`Clock`] - time source handlers use to stamp records
//!
//! This crate depends only on `domain`.

pub mod clock;
pub mod handler;
pub mod sink;

pub use clock::Clock;
pub use handler::{HandlerFactory, HandlerState, LogHandler, handler_factory};
pub use sink::LogSink;

// Re-export the domain types used in port signatures, so adapter crates can
// implement ports without directly depending on `fanlog-domain`.
pub use fanlog_domain::{Level, LogRecord, Metadata, MetadataValue, SourceLocation};

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
