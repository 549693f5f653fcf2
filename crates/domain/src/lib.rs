//! # fanlog-domain
//!
//! Value types of the logging model:
//!
//! - **Level** - seven ordered severities used for filtering
//! - **Metadata** - ordered key/value context with right-biased merge
//! - **Record** - `SourceLocation` and the `LogRecord` handed to handlers
//!
//! ## Dependency Rules
//!
//! - Depends only on `shared` crate
//! - No I/O, no clocks, no global state

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub use fanlog_shared::shared_crate_version;

pub mod level;
pub mod metadata;
pub mod record;

pub use level::{Level, LevelParseError};
pub use metadata::{MAX_METADATA_DEPTH, Metadata, MetadataError, MetadataValue, TRUNCATED};
pub use record::{LogRecord, SourceLocation};

/// Returns the domain crate version.
#[must_use]
pub const fn domain_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
