//! Registry endpoint URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::Error;

/// A validated registry service endpoint address.
///
/// This is connection configuration, so unlike the identifier types it is
/// checked at construction time: the address must be an absolute HTTP or
/// HTTPS URL with a host.
///
/// # Example
///
/// ```
/// use urnreg_core::RegistryUrl;
///
/// let endpoint = RegistryUrl::new("https://id.example.org/service").unwrap();
/// assert_eq!(endpoint.host(), Some("id.example.org"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistryUrl(Url);

impl RegistryUrl {
    /// Create a new registry URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute, not http(s), or has
    /// no host.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| Error::InvalidUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            });
        }

        let scheme = url.scheme();
        if scheme != "http" && scheme != "https" {
            return Err(Error::InvalidUrl {
                value: original.to_string(),
                reason: "must use http or https".to_string(),
            });
        }

        if url.host_str().is_none() {
            return Err(Error::InvalidUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the address as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }
}

impl fmt::Display for RegistryUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RegistryUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for RegistryUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for RegistryUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RegistryUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for RegistryUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let endpoint = RegistryUrl::new("https://id.example.org/service").unwrap();
        assert_eq!(endpoint.host(), Some("id.example.org"));
    }

    #[test]
    fn valid_http_url() {
        let endpoint = RegistryUrl::new("http://localhost:8080/id").unwrap();
        assert_eq!(endpoint.host(), Some("localhost"));
    }

    #[test]
    fn rejects_non_http_scheme() {
        assert!(RegistryUrl::new("ftp://id.example.org").is_err());
    }

    #[test]
    fn rejects_relative_url() {
        assert!(RegistryUrl::new("/service/v2").is_err());
    }

    #[test]
    fn serde_round_trip() {
        let endpoint = RegistryUrl::new("https://id.example.org/service").unwrap();
        let json = serde_json::to_string(&endpoint).unwrap();
        let back: RegistryUrl = serde_json::from_str(&json).unwrap();
        assert_eq!(endpoint, back);
    }
}
