//! Core traits for registry endpoint behavior.

mod endpoint;

pub use endpoint::RegistryEndpoint;
