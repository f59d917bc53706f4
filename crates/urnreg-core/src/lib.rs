//! urnreg-core - Core URN registry types and traits.

pub mod credentials;
pub mod error;
pub mod ops;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::{Error, RemoteError};
pub use tokens::SessionToken;
pub use traits::RegistryEndpoint;
pub use types::{RegistryUrl, SeriesCode, TargetUrl, Urn};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
