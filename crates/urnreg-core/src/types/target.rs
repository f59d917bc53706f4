//! Target URL type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A target: a network location bound to a URN.
///
/// A URN may carry several targets, one of which may be marked default.
/// The string is passed to the service verbatim; no local URL parsing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetUrl(String);

impl TargetUrl {
    /// Wrap a target URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// Returns the target URL as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TargetUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TargetUrl {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for TargetUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
