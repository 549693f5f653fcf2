//! # fanlog-app
//!
//! The `Logger` facade and the one-shot `LoggingSystem` that supplies the
//! default handler factory.
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod logger;
pub mod system;

pub use logger::Logger;
pub use system::LoggingSystem;

/// Returns the app crate version.
#[must_use]
pub const fn app_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
