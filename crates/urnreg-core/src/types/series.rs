//! Series code type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A series code: the namespace prefix under which URNs are created.
///
/// A series may or may not support sequential assignment, and a caller may
/// or may not hold authority over it. Neither capability is checked locally;
/// the service rejects operations it does not permit.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesCode(String);

impl SeriesCode {
    /// Wrap a series code string.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the series code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SeriesCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SeriesCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for SeriesCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
