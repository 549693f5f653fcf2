//! Severity levels and threshold comparisons.

use fanlog_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered log severity, least severe first.
///
/// The derived `Ord` follows declaration order, which is the severity order:
/// `Trace < Debug < Info < Notice < Warning < Error < Critical`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Fine-grained tracing output.
    Trace,
    /// Debugging detail.
    Debug,
    /// Informational messages.
    #[default]
    Info,
    /// Normal but significant conditions.
    Notice,
    /// Conditions that may need attention.
    #[serde(alias = "warn")]
    Warning,
    /// Failed operations.
    Error,
    /// Conditions requiring immediate action.
    Critical,
}

impl Level {
    /// Every level in ascending severity.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Notice,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Threshold applied when neither the logger nor the handler overrides it.
    pub const DEFAULT: Self = Self::Info;

    /// Returns true when `self` passes a filter set at `threshold`.
    #[must_use]
    pub fn is_at_least(self, threshold: Self) -> bool {
        self >= threshold
    }

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Notice => "notice",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let lowered = input.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "notice" => Ok(Self::Notice),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" => Ok(Self::Critical),
            _ => Err(LevelParseError {
                input: input.to_string(),
            }),
        }
    }
}

/// A level name that is not one of the seven known severities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelParseError {
    /// Raw input that failed to parse.
    pub input: String,
}

impl fmt::Display for LevelParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown log level `{}` (expected one of trace, debug, info, notice, warning, error, critical)",
            self.input
        )
    }
}

impl std::error::Error for LevelParseError {}

impl From<LevelParseError> for ErrorEnvelope {
    fn from(error: LevelParseError) -> Self {
        let message = error.to_string();
        Self::expected(ErrorCode::new("domain", "invalid_level"), message)
            .with_metadata("input", error.input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::cmp::Ordering;

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Notice < Level::Warning);
        assert!(Level::Error < Level::Critical);
        assert_eq!(Level::Warning.cmp(&Level::Warning), Ordering::Equal);
        assert_eq!(Level::default(), Level::Info);
        assert_eq!(Level::DEFAULT, Level::Info);
    }

    #[test]
    fn is_at_least_matches_threshold_semantics() {
        assert!(Level::Error.is_at_least(Level::Warning));
        assert!(Level::Warning.is_at_least(Level::Warning));
        assert!(!Level::Debug.is_at_least(Level::Info));
    }

    #[test]
    fn parse_is_case_insensitive_and_accepts_warn() -> Result<(), LevelParseError> {
        assert_eq!("TRACE".parse::<Level>()?, Level::Trace);
        assert_eq!(" Notice ".parse::<Level>()?, Level::Notice);
        assert_eq!("warn".parse::<Level>()?, Level::Warning);
        Ok(())
    }

    #[test]
    fn parse_rejects_unknown_names() {
        let error = "verbose".parse::<Level>().err();
        assert_eq!(
            error,
            Some(LevelParseError {
                input: "verbose".to_string()
            })
        );

        let envelope: ErrorEnvelope = LevelParseError {
            input: "verbose".to_string(),
        }
        .into();
        assert_eq!(envelope.code.code(), "invalid_level");
        assert_eq!(
            envelope.metadata.get("input").map(String::as_str),
            Some("verbose")
        );
    }

    #[test]
    fn serde_uses_lowercase_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&Level::Critical)?, "\"critical\"");
        let parsed: Level = serde_json::from_str("\"warn\"")?;
        assert_eq!(parsed, Level::Warning);
        Ok(())
    }

    proptest! {
        #[test]
        fn display_round_trips_through_parse(index in 0usize..7) {
            let level = Level::ALL.get(index).copied().unwrap_or_default();
            let parsed: Level = level
                .to_string()
                .parse()
                .map_err(|_| TestCaseError::fail("level parse failed"))?;
            prop_assert_eq!(parsed, level);
        }

        #[test]
        fn ordering_agrees_with_declaration_index(left in 0usize..7, right in 0usize..7) {
            let a = Level::ALL.get(left).copied().unwrap_or_default();
            let b = Level::ALL.get(right).copied().unwrap_or_default();
            prop_assert_eq!(a.cmp(&b), left.cmp(&right));
            prop_assert_eq!(a.is_at_least(b), left >= right);
        }
    }
}
