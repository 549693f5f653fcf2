//! Call-site location and the record handed to handlers.

use crate::{Level, Metadata};
use serde::Serialize;
use std::fmt;
use std::panic::Location;

/// Static call-site information attached to every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceLocation {
    /// Source file path as reported by the compiler.
    pub file: &'static str,
    /// Enclosing function path, or [`SourceLocation::UNKNOWN_FUNCTION`].
    pub function: &'static str,
    /// 1-indexed line number.
    pub line: u32,
}

impl SourceLocation {
    /// Placeholder used when the function path was not captured.
    pub const UNKNOWN_FUNCTION: &'static str = "<unknown>";

    /// Build a location from its parts.
    #[must_use]
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }

    /// Capture the caller's file and line.
    ///
    /// Only file and line are available through `#[track_caller]`; use
    /// [`source_location!`](crate::source_location) to capture the function too.
    #[must_use]
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Self::new(location.file(), Self::UNKNOWN_FUNCTION, location.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{} ({})", self.file, self.line, self.function)
    }
}

/// A record that passed filtering: level, rendered message, merged metadata
/// and call-site location.
///
/// Records carry no timestamp; the handler that emits the record stamps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity.
    pub level: Level,
    /// Rendered message.
    pub message: String,
    /// Handler metadata with call-site metadata merged over it.
    pub metadata: Metadata,
    /// Where the log statement lives.
    pub location: SourceLocation,
}

/// Capture the current file, line, and enclosing function path.
#[macro_export]
macro_rules! source_location {
    () => {
        $crate::SourceLocation::new(::core::file!(), $crate::__function_path!(), ::core::line!())
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __function_path {
    () => {{
        fn __here() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::core::any::type_name::<T>()
        }
        let name = __type_name_of(__here);
        match name.strip_suffix("::__here") {
            Some(stripped) => stripped,
            None => name,
        }
    }};
}
