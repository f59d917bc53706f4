//! Client configuration.

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use urnreg_core::{Credentials, Error, RegistryUrl, Result};

/// Connection parameters for a registry client.
///
/// The explicit equivalent of what a configuration file supplies: the
/// endpoint address plus optional default credentials. Explicit values
/// passed to `login` override the configured defaults.
///
/// # Example
///
/// ```
/// use urnreg_client::RegistryConfig;
/// use urnreg_core::RegistryUrl;
///
/// let config = RegistryConfig::new(RegistryUrl::new("https://id.example.org/service").unwrap())
///     .with_username("alice");
/// assert_eq!(config.username.as_deref(), Some("alice"));
/// ```
#[derive(Clone, Deserialize)]
pub struct RegistryConfig {
    /// Address of the registry service endpoint.
    pub endpoint: RegistryUrl,
    /// Default username for a parameterless login.
    #[serde(default)]
    pub username: Option<String>,
    /// Default password for a parameterless login.
    #[serde(default)]
    pub password: Option<String>,
}

impl RegistryConfig {
    /// Create a configuration with no default credentials.
    pub fn new(endpoint: RegistryUrl) -> Self {
        Self {
            endpoint,
            username: None,
            password: None,
        }
    }

    /// Set the default username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the default password.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Load a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file cannot be read or parsed.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Merge explicit credentials over the configured defaults.
    ///
    /// Fails with [`Error::MissingCredential`] when a credential is
    /// available from neither source, so a login never sends an empty
    /// username or password.
    pub(crate) fn resolve_credentials(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Credentials> {
        let username = username
            .map(str::to_owned)
            .or_else(|| self.username.clone())
            .ok_or(Error::MissingCredential { field: "username" })?;
        let password = password
            .map(str::to_owned)
            .or_else(|| self.password.clone())
            .ok_or(Error::MissingCredential { field: "password" })?;
        Ok(Credentials::new(username, password))
    }
}

// Intentionally hide the password in Debug output
impl fmt::Debug for RegistryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryConfig")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
