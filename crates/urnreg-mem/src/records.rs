//! Record types stored by the in-memory registry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use urnreg_core::{TargetUrl, Urn};

/// One target location bound to a URN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    /// The location the URN resolves to.
    pub url: TargetUrl,
    /// Whether this is the URN's default target.
    pub is_default: bool,
}

/// Everything the registry knows about one URN.
///
/// A record with no targets is a reserved URN.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrnRecord {
    /// The identifier itself.
    pub urn: Urn,
    /// Registered targets; at most one is marked default.
    pub targets: Vec<Target>,
    /// When the URN was first stored.
    pub created: DateTime<Utc>,
    /// When the record last changed.
    pub last_modified: DateTime<Utc>,
}

impl UrnRecord {
    pub(crate) fn new(urn: Urn, now: DateTime<Utc>) -> Self {
        Self {
            urn,
            targets: Vec::new(),
            created: now,
            last_modified: now,
        }
    }

    /// Returns the default target, if one is set.
    pub fn default_target(&self) -> Option<&Target> {
        self.targets.iter().find(|t| t.is_default)
    }

    /// Whether `url` is bound to this URN.
    pub fn has_target(&self, url: &TargetUrl) -> bool {
        self.targets.iter().any(|t| &t.url == url)
    }
}
