//! URN identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A persistent identifier within a series.
///
/// A URN may be reserved (registered with no targets), registered (bound to
/// one or more targets), or unknown to the service. Syntax is enforced by
/// the registry service, not locally.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Urn(String);

impl Urn {
    /// Wrap a URN string.
    pub fn new(urn: impl Into<String>) -> Self {
        Self(urn.into())
    }

    /// Returns the URN as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Urn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Urn {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AsRef<str> for Urn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
