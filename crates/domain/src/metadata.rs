//! Structured key/value context attached to log records.
//!
//! `Metadata` keeps insertion order so rendered output is deterministic, but
//! equality ignores order: two mappings are equal when they hold the same keys
//! with equal values.

use fanlog_shared::{ErrorCode, ErrorEnvelope};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use std::fmt;

/// Maximum nesting of arrays/maps inside a single metadata value.
///
/// `Metadata::try_set` rejects deeper values; renderers print anything past
/// this bound as [`TRUNCATED`].
pub const MAX_METADATA_DEPTH: usize = 8;

/// Placeholder rendered in place of values nested beyond [`MAX_METADATA_DEPTH`].
pub const TRUNCATED: &str = "[truncated]";

/// Validation failures for metadata values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataError {
    /// Value nests deeper than [`MAX_METADATA_DEPTH`].
    TooDeep {
        /// Key the value was assigned to.
        key: String,
        /// Measured nesting depth.
        depth: usize,
    },
}

impl fmt::Display for MetadataError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooDeep { key, depth } => write!(
                formatter,
                "metadata value for `{key}` nests {depth} levels (max {MAX_METADATA_DEPTH})"
            ),
        }
    }
}

impl std::error::Error for MetadataError {}

impl From<MetadataError> for ErrorEnvelope {
    fn from(error: MetadataError) -> Self {
        let message = error.to_string();
        match error {
            MetadataError::TooDeep { key, depth } => {
                Self::expected(ErrorCode::new("domain", "metadata_too_deep"), message)
                    .with_metadata("key", key)
                    .with_metadata("depth", depth.to_string())
            },
        }
    }
}

/// A metadata value: a string, a sequence of values, or a nested mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataValue {
    /// Plain string value.
    String(Box<str>),
    /// Ordered sequence of values.
    Array(Vec<MetadataValue>),
    /// Nested mapping.
    Map(Metadata),
}

impl MetadataValue {
    /// Build a string value from anything printable.
    pub fn display(value: impl fmt::Display) -> Self {
        Self::String(value.to_string().into_boxed_str())
    }

    /// Returns the string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            Self::Array(_) | Self::Map(_) => None,
        }
    }

    /// Nesting depth: strings are 0, containers are one more than their deepest child.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::String(_) => 0,
            Self::Array(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
            Self::Map(map) => 1 + map.values().map(Self::depth).max().unwrap_or(0),
        }
    }

    fn render(&self, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        match self {
            Self::String(value) => formatter.write_str(value),
            Self::Array(_) | Self::Map(_) if depth >= MAX_METADATA_DEPTH => {
                formatter.write_str(TRUNCATED)
            },
            Self::Array(items) => {
                formatter.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    item.render(formatter, depth + 1)?;
                }
                formatter.write_str("]")
            },
            Self::Map(map) => map.render(formatter, depth + 1),
        }
    }
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(formatter, 0)
    }
}

impl From<&str> for MetadataValue {
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<String> for MetadataValue {
    fn from(value: String) -> Self {
        Self::String(value.into_boxed_str())
    }
}

impl From<Box<str>> for MetadataValue {
    fn from(value: Box<str>) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for MetadataValue {
    fn from(values: Vec<T>) -> Self {
        Self::Array(values.into_iter().map(Into::into).collect())
    }
}

impl From<Metadata> for MetadataValue {
    fn from(value: Metadata) -> Self {
        Self::Map(value)
    }
}

impl Serialize for MetadataValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(value) => serializer.serialize_str(value),
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            },
            Self::Map(map) => map.serialize(serializer),
        }
    }
}

/// Ordered mapping from string keys to [`MetadataValue`]s.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    entries: Vec<(Box<str>, MetadataValue)>,
}

impl Metadata {
    /// Create an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no entries are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.entries
            .iter()
            .find(|(existing, _)| &**existing == key)
            .map(|(_, value)| value)
    }

    /// Returns true when `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Insert or replace a value. Replacing keeps the key's original position.
    pub fn set(&mut self, key: impl Into<Box<str>>, value: impl Into<MetadataValue>) {
        let key = key.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(existing, _)| *existing == key)
        {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Like [`Metadata::set`], but rejects values nested beyond [`MAX_METADATA_DEPTH`].
    pub fn try_set(
        &mut self,
        key: impl Into<Box<str>>,
        value: impl Into<MetadataValue>,
    ) -> Result<(), MetadataError> {
        let key = key.into();
        let value = value.into();
        let depth = value.depth();
        if depth > MAX_METADATA_DEPTH {
            return Err(MetadataError::TooDeep {
                key: key.into_string(),
                depth,
            });
        }
        self.set(key, value);
        Ok(())
    }

    /// Remove a key, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<MetadataValue> {
        let index = self
            .entries
            .iter()
            .position(|(existing, _)| &**existing == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetadataValue)> {
        self.entries
            .iter()
            .map(|(key, value)| (&**key, value))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| &**key)
    }

    /// Iterate values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &MetadataValue> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Merge `overrides` over `base` into a new mapping.
    ///
    /// Overrides win on key collision. Base keys come first in their original
    /// order (colliding keys keep the base position), followed by
    /// override-only keys in their own order.
    #[must_use]
    pub fn merge(base: &Self, overrides: &Self) -> Self {
        let mut merged = base.clone();
        merged.extend(overrides.iter().map(|(key, value)| (key, value.clone())));
        merged
    }

    fn render(&self, formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        formatter.write_str("{")?;
        for (index, (key, value)) in self.iter().enumerate() {
            if index > 0 {
                formatter.write_str(", ")?;
            }
            write!(formatter, "{key}=")?;
            value.render(formatter, depth)?;
        }
        formatter.write_str("}")
    }
}

impl PartialEq for Metadata {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for Metadata {}

impl fmt::Display for Metadata {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(formatter, 0)
    }
}

impl<K, V> Extend<(K, V)> for Metadata
where
    K: Into<Box<str>>,
    V: Into<MetadataValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<Box<str>>,
    V: Into<MetadataValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        metadata.extend(iter);
        metadata
    }
}

impl IntoIterator for Metadata {
    type Item = (Box<str>, MetadataValue);
    type IntoIter = std::vec::IntoIter<(Box<str>, MetadataValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Build a [`Metadata`] mapping from `key => value` pairs.
///
/// ```
/// use fanlog_domain::metadata;
///
/// let metadata = metadata! { "request_id" => "r-1", "tags" => vec!["a", "b"] };
/// assert_eq!(metadata.len(), 2);
/// ```
#[macro_export]
macro_rules! metadata {
    () => {
        $crate::Metadata::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut metadata = $crate::Metadata::new();
        $( metadata.set($key, $value); )+
        metadata
    }};
}
