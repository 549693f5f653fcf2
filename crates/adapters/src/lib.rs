//! # fanlog-adapters
//!
//! Concrete handlers, sinks and clocks:
//!
//! - [`StreamHandler`] for plain text lines
//! - [`JsonHandler`] for one JSON object per line
//! - [`MultiplexHandler`] for fan-out
//! - [`AnnotationHandler`] for CI workflow annotations
//! - [`TracingHandler`] to bridge into `tracing`
//!
//! This crate depends on `ports`, `domain`, and `shared`.

pub mod annotation;
pub mod clock;
pub mod json;
pub mod log_sink;
pub mod multiplex;
pub mod stream;
pub mod tracing_bridge;

pub use annotation::AnnotationHandler;
pub use clock::{SystemClock, format_timestamp};
pub use json::JsonHandler;
pub use log_sink::{StderrLogSink, StdoutLogSink, WriterLogSink};
pub use multiplex::MultiplexHandler;
pub use stream::StreamHandler;
pub use tracing_bridge::{TRACING_TARGET, TracingHandler};

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workspace_deps() -> Vec<String> {
        let cargo_toml = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml"));
        let mut deps = Vec::new();
        let mut in_deps = false;

        for raw_line in cargo_toml.lines() {
            let line = raw_line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') {
                in_deps = line == "[dependencies]";
                continue;
            }
            if in_deps && line.starts_with("fanlog-") {
                let key = line.split('=').next().unwrap_or("").trim();
                let name = key.split('.').next().unwrap_or("").trim();
                deps.push(name.to_string());
            }
        }

        deps
    }

    #[test]
    fn adapters_do_not_depend_on_app_or_infra() {
        let deps = workspace_deps();
        let forbidden = ["fanlog-app", "fanlog-infra", "fanlog-facade", "fanlog-config"];

        for dep in &deps {
            assert!(
                !forbidden.contains(&dep.as_str()),
                "adapters must not depend on {dep}"
            );
        }
        assert!(deps.iter().any(|dep| dep == "fanlog-ports"));
        assert!(!adapters_crate_version().is_empty());
    }
}
