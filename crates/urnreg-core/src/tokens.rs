//! Session token type.

use std::fmt;

/// An opaque session token issued by the registry service on login.
///
/// The token authenticates every mutating operation for the lifetime of one
/// session. It is held only in memory and never persisted.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Create a new session token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use as a remote call argument.
    ///
    /// # Security
    ///
    /// Use only when constructing remote calls. Never log or display
    /// this value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the service handed back an empty value.
    ///
    /// An empty token cannot authenticate anything; callers treat it the
    /// same as holding no token at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Hide token value in Debug output
impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SessionToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_token_hides_value_in_debug() {
        let token = SessionToken::new("d6f4b58c-40c5-4a4e-9a9f-64c0c0a4b9e1");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("d6f4b58c"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn empty_token_is_empty() {
        assert!(SessionToken::new("").is_empty());
        assert!(!SessionToken::new("t").is_empty());
    }
}
