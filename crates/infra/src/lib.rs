//! # fanlog-infra
//!
//! Composition root: turns a validated `LoggingConfig` into a
//! `HandlerFactory`. This crate depends on `adapters`, `config`, `ports`,
//! and `shared`.

/// Handler factory composition.
pub mod handler_factory;

pub use handler_factory::{
    SinkTargets, handler_factory, handler_factory_with_targets, load_handler_factory,
};

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infra_crate_version_is_set() {
        assert!(!infra_crate_version().is_empty());
    }
}
