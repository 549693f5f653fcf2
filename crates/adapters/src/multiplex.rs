//! Fan-out handler forwarding records to several children.

use fanlog_ports::{HandlerState, Level, LogHandler, LogRecord};
use fanlog_shared::{ErrorCode, ErrorEnvelope, Result};

/// Forwards each record to every child whose threshold admits it.
///
/// Each child sees the record with its own handler metadata merged under the
/// record's metadata, so a child's context never leaks into its siblings.
/// The multiplexer's own level and metadata are independent of its children:
/// they start as the most verbose child level and empty metadata, and are
/// never pushed down. Children are visited in construction order.
pub struct MultiplexHandler {
    state: HandlerState,
    children: Vec<Box<dyn LogHandler>>,
}

impl MultiplexHandler {
    /// Compose `children` into one handler.
    ///
    /// Fails with `config:empty_multiplex` when `children` is empty.
    pub fn new(children: Vec<Box<dyn LogHandler>>) -> Result<Self> {
        let Some(most_verbose) = children.iter().map(|child| child.log_level()).min() else {
            return Err(ErrorEnvelope::expected(
                ErrorCode::empty_multiplex(),
                "multiplex handler requires at least one child",
            ));
        };
        Ok(Self {
            state: HandlerState::new(most_verbose),
            children,
        })
    }

    /// Children in forwarding order.
    pub fn children(&self) -> &[Box<dyn LogHandler>] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Always false; construction rejects empty child lists.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl LogHandler for MultiplexHandler {
    fn log(&self, record: LogRecord) {
        for child in self
            .children
            .iter()
            .filter(|child| record.level.is_at_least(child.log_level()))
        {
            child.log(LogRecord {
                metadata: child.merged_metadata(Some(&record.metadata)),
                ..record.clone()
            });
        }
    }

    fn state(&self) -> &HandlerState {
        &self.state
    }

    fn set_log_level(&self, level: Level) {
        tracing::trace!(target: "fanlog::multiplex", %level, "multiplex threshold changed");
        self.state.set_level(level);
    }
}
