//! Level macros with `format!` syntax and full call-site capture.
//!
//! ```
//! use fanlog_facade::{info, metadata, new_logger};
//!
//! let logger = new_logger("orders");
//! let order_id = 42;
//! info!(logger, "order {order_id} accepted");
//! info!(logger, metadata: &metadata! { "order" => "42" }, "order accepted");
//! ```
//!
//! The message is only formatted when the level passes the logger's
//! threshold.

/// Emit at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, metadata: $metadata:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            || ::std::format!($($arg)+),
            ::core::option::Option::Some($metadata),
            $crate::source_location!(),
        )
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log(
            $level,
            || ::std::format!($($arg)+),
            ::core::option::Option::None,
            $crate::source_location!(),
        )
    };
}

/// Emit at `trace`.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Emit at `debug`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Emit at `info`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Emit at `notice`.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Notice, $($arg)+)
    };
}

/// Emit at `warning`.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warning, $($arg)+)
    };
}

/// Emit at `error`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Emit at `critical`.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}
