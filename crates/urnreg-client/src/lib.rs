//! urnreg-client - Session-guarded client for a URN registry service.
//!
//! [`UrnClient`] wraps a [`urnreg_core::RegistryEndpoint`] and owns the
//! current session token. Every mutating operation passes through a single
//! authentication guard: with no live token the call fails locally with
//! [`urnreg_core::Error::AuthenticationRequired`] and nothing reaches the
//! endpoint; with a token held, the call is forwarded with the token
//! prepended as the first argument.

mod client;
mod config;

pub use client::UrnClient;
pub use config::RegistryConfig;
