//! urnreg-mem - In-memory URN registry endpoint.
//!
//! [`MemRegistry`] simulates the registry service's account, session,
//! series, and record behavior behind the
//! [`urnreg_core::RegistryEndpoint`] trait. Nothing is persisted; state
//! lives for the lifetime of the instance. Intended for integration tests
//! and offline development against realistic service semantics.

mod records;
mod registry;

pub use records::{Target, UrnRecord};
pub use registry::MemRegistry;
