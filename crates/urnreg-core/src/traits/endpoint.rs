//! Registry endpoint trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

/// A named-operation RPC surface offered by a URN registry service.
///
/// Implementations own the transport: wire encoding, connection handling,
/// and timeout policy all live behind `invoke`. The client treats results
/// as opaque JSON and passes them through unmodified.
///
/// Transport errors, malformed responses, and business-rule rejections are
/// all surfaced as [`Error::Remote`](crate::Error::Remote).
#[async_trait]
pub trait RegistryEndpoint: Send + Sync {
    /// Invoke a named operation with positional arguments.
    ///
    /// Operation names are the wire names from [`crate::ops`]. For
    /// authenticated operations the session token is the first argument.
    async fn invoke(&self, operation: &str, args: Vec<Value>) -> Result<Value>;
}
