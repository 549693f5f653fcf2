//! Handler factory composition from a validated config.
//!
//! Every call of the returned factory builds fresh handlers: one per
//! configured sink, wrapped in a [`MultiplexHandler`] when there are several.
//! The config's base metadata is applied to the outermost handler.

use fanlog_adapters::{
    AnnotationHandler, JsonHandler, MultiplexHandler, StderrLogSink, StdoutLogSink, StreamHandler,
    SystemClock, TracingHandler,
};
use fanlog_config::{
    LoggingEnv, SinkConfig, SinkKind, ValidatedLoggingConfig, load_config_from_path,
};
use fanlog_domain::{Level, Metadata};
use fanlog_ports::{Clock, HandlerFactory, LogHandler, LogSink};
use fanlog_shared::Result;
use std::path::Path;
use std::sync::Arc;

/// Label used to build a throwaway handler when validating a factory.
const VALIDATION_LABEL: &str = "fanlog";

/// Destinations and time source shared by every handler a factory builds.
#[derive(Clone)]
pub struct SinkTargets {
    /// Where `stdout`, `json-stdout` and `ci-annotation` sinks write.
    pub stdout: Arc<dyn LogSink>,
    /// Where `stderr` and `json-stderr` sinks write.
    pub stderr: Arc<dyn LogSink>,
    /// Timestamp source for text and JSON sinks.
    pub clock: Arc<dyn Clock>,
}

impl Default for SinkTargets {
    fn default() -> Self {
        Self {
            stdout: Arc::new(StdoutLogSink),
            stderr: Arc::new(StderrLogSink),
            clock: Arc::new(SystemClock),
        }
    }
}

impl std::fmt::Debug for SinkTargets {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_struct("SinkTargets").finish_non_exhaustive()
    }
}

/// Build a factory writing to the process stdout/stderr.
pub fn handler_factory(config: &ValidatedLoggingConfig) -> Result<HandlerFactory> {
    handler_factory_with_targets(config, SinkTargets::default())
}

/// Load the config (env > file > defaults) and compose its factory.
///
/// The validated config is returned alongside so callers can report it.
pub fn load_handler_factory(
    config_path: Option<&Path>,
    env: &LoggingEnv,
) -> Result<(ValidatedLoggingConfig, HandlerFactory)> {
    let config = load_config_from_path(config_path, env)?;
    let factory = handler_factory(&config)?;
    Ok((config, factory))
}

/// Build a factory writing to `targets`.
///
/// Composition is checked once up front so the factory itself cannot fail.
pub fn handler_factory_with_targets(
    config: &ValidatedLoggingConfig,
    targets: SinkTargets,
) -> Result<HandlerFactory> {
    let plan = Arc::new(FactoryPlan {
        level: config.level,
        metadata: config.metadata().clone(),
        sinks: config.sinks.clone(),
        targets,
    });
    plan.build(VALIDATION_LABEL)?;

    tracing::debug!(
        target: "fanlog::infra",
        sinks = plan.sinks.len(),
        level = %plan.level,
        "handler factory composed"
    );

    Ok(fanlog_ports::handler_factory(move |label: &str| -> Arc<dyn LogHandler> {
        match plan.build(label) {
            Ok(handler) => handler,
            Err(error) => {
                tracing::error!(
                    target: "fanlog::infra",
                    %label,
                    code = %error.code,
                    "handler composition failed; using stdout"
                );
                Arc::new(StreamHandler::new(Arc::clone(&plan.targets.stdout)))
            },
        }
    }))
}

struct FactoryPlan {
    level: Level,
    metadata: Metadata,
    sinks: Vec<SinkConfig>,
    targets: SinkTargets,
}

impl FactoryPlan {
    fn build(&self, label: &str) -> Result<Arc<dyn LogHandler>> {
        let mut children: Vec<Box<dyn LogHandler>> = self
            .sinks
            .iter()
            .map(|sink| self.sink_handler(sink, label))
            .collect();

        let handler: Arc<dyn LogHandler> = if children.len() == 1 {
            match children.pop() {
                Some(child) => Arc::from(child),
                None => Arc::new(MultiplexHandler::new(children)?),
            }
        } else {
            Arc::new(MultiplexHandler::new(children)?)
        };
        if !self.metadata.is_empty() {
            handler.set_metadata(self.metadata.clone());
        }
        Ok(handler)
    }

    fn sink_handler(&self, sink: &SinkConfig, label: &str) -> Box<dyn LogHandler> {
        let level = sink.effective_level(self.level);
        let targets = &self.targets;
        match sink.kind {
            SinkKind::Stdout | SinkKind::Stderr => {
                let destination = if sink.kind.is_stderr() {
                    &targets.stderr
                } else {
                    &targets.stdout
                };
                let mut handler = StreamHandler::new(Arc::clone(destination))
                    .with_clock(Arc::clone(&targets.clock))
                    .with_metadata_rendering(sink.render_metadata)
                    .with_level(level);
                if sink.render_label {
                    handler = handler.with_label(label);
                }
                Box::new(handler)
            },
            SinkKind::JsonStdout | SinkKind::JsonStderr => {
                let destination = if sink.kind.is_stderr() {
                    &targets.stderr
                } else {
                    &targets.stdout
                };
                Box::new(
                    JsonHandler::new(label, Arc::clone(destination))
                        .with_clock(Arc::clone(&targets.clock))
                        .with_level(level),
                )
            },
            SinkKind::CiAnnotation => Box::new(
                AnnotationHandler::new(label, Arc::clone(&targets.stdout)).with_level(level),
            ),
            SinkKind::Tracing => Box::new(TracingHandler::new(label).with_level(level)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fanlog_config::LoggingConfig;
    use fanlog_testkit::{FixedClock, MemorySink};

    fn targets(out: &Arc<MemorySink>, err: &Arc<MemorySink>) -> SinkTargets {
        let stdout: Arc<dyn LogSink> = out.clone();
        let stderr: Arc<dyn LogSink> = err.clone();
        SinkTargets {
            stdout,
            stderr,
            clock: Arc::new(FixedClock::default()),
        }
    }

    #[test]
    fn default_config_builds_info_handler() -> Result<()> {
        let config = LoggingConfig::default().validate()?;
        let out = Arc::new(MemorySink::default());
        let err = Arc::new(MemorySink::default());
        let factory = handler_factory_with_targets(&config, targets(&out, &err))?;

        let handler = factory("api");
        assert_eq!(handler.log_level(), Level::Info);
        assert!(handler.metadata().is_empty());
        Ok(())
    }

    #[test]
    fn multiplex_starts_at_most_verbose_sink() -> Result<()> {
        let config = LoggingConfig {
            level: Level::Warning,
            sinks: vec![
                SinkConfig::new(SinkKind::Stdout),
                SinkConfig {
                    level: Some(Level::Debug),
                    ..SinkConfig::new(SinkKind::JsonStderr)
                },
            ],
            ..LoggingConfig::default()
        }
        .validate()?;
        let out = Arc::new(MemorySink::default());
        let err = Arc::new(MemorySink::default());
        let factory = handler_factory_with_targets(&config, targets(&out, &err))?;

        assert_eq!(factory("api").log_level(), Level::Debug);
        Ok(())
    }

    #[test]
    fn composing_a_factory_writes_nothing() -> Result<()> {
        let config = LoggingConfig::default().validate()?;
        let out = Arc::new(MemorySink::default());
        let err = Arc::new(MemorySink::default());
        let _factory = handler_factory_with_targets(&config, targets(&out, &err))?;

        assert!(out.lines().is_empty());
        assert!(err.lines().is_empty());
        Ok(())
    }
}
