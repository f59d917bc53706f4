//! Error types for URN registry clients.
//!
//! The taxonomy separates failures raised locally (a guarded call with no
//! session, an operation the service does not implement) from failures
//! surfaced by the remote endpoint, which are passed through opaquely.

use std::fmt;
use thiserror::Error;

/// The unified error type for registry operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A guarded operation was invoked with no live session token.
    ///
    /// Raised locally, before any remote call. Recoverable by calling
    /// `login` and retrying.
    #[error("authentication required: no session token held, log in first")]
    AuthenticationRequired,

    /// `login` could not resolve a credential from its arguments or the
    /// configuration. Raised locally, before any remote call.
    #[error("missing credential: no {field} supplied and none configured")]
    MissingCredential {
        /// Which credential was unavailable ("username" or "password").
        field: &'static str,
    },

    /// The operation is not implemented by the registry service.
    ///
    /// Raised locally; the service itself documents these operations as
    /// unimplemented, so no remote call is ever attempted.
    #[error("operation '{operation}' is not implemented by the registry service")]
    UnsupportedOperation {
        /// The remote operation name.
        operation: &'static str,
    },

    /// An endpoint address failed validation at construction time.
    #[error("invalid registry URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Any failure surfaced by the remote endpoint: transport errors,
    /// malformed responses, and business-rule rejections alike.
    #[error("registry failure: {0}")]
    Remote(#[from] RemoteError),
}

/// An opaque failure reported by the remote endpoint.
///
/// The client forwards these without translation or retry. `code` carries
/// the service's fault code when one was given.
#[derive(Debug, Clone)]
pub struct RemoteError {
    /// Fault code reported by the service (if present).
    pub code: Option<String>,
    /// Human-readable message from the service or transport.
    pub message: Option<String>,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "remote fault")?;
        if let Some(ref code) = self.code {
            write!(f, " [{}]", code)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for RemoteError {}

impl RemoteError {
    /// Create a new remote error.
    pub fn new(code: Option<String>, message: Option<String>) -> Self {
        Self { code, message }
    }

    /// Create a remote error carrying a fault code and message.
    pub fn fault(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Some(code.into()), Some(message.into()))
    }

    /// Check if this fault concerns the session itself (expired or
    /// unknown token), in which case a fresh `login` may resolve it.
    pub fn is_auth_fault(&self) -> bool {
        matches!(
            self.code.as_deref(),
            Some("InvalidSsoToken") | Some("SsoTokenExpired") | Some("InvalidCredentials")
        )
    }
}
