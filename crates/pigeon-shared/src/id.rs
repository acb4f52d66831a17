use std::{borrow::Cow, fmt::Display};

use crate::errors::ConversionError;

/// Identifier assigned by the backend (opaque, usually a hex object id)
#[derive(
    Debug,
    Default,
    serde::Serialize,
    serde::Deserialize,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The id percent-encoded so it stays a single URL path segment
    ///
    /// Empty and dot-only ids are rejected as URL normalization would move
    /// the request to a different path.
    pub fn as_path_segment(&self) -> Result<Cow<'_, str>, ConversionError> {
        match self.0.as_str() {
            "" => Err(ConversionError::Empty),
            "." | ".." => Err(ConversionError::DotSegment),
            raw => Ok(urlencoding::encode(raw)),
        }
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
