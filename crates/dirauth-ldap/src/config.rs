//! Directory client configuration.

use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the directory authentication client.
///
/// Immutable once loaded; shared read-only by every component.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Directory server hostname or IP address.
    pub host: String,

    /// Plain LDAP port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Encrypted LDAPS port.
    #[serde(default = "default_ldaps_port")]
    pub ldaps_port: u16,

    /// Use the encrypted transport (`ldaps://`).
    #[serde(default)]
    pub use_ldaps: bool,

    /// Domain prefix for down-level logon names (`DOMAIN\username`).
    pub domain: String,

    /// Base DN for account searches (e.g. "dc=example,dc=local").
    pub search_base: String,

    /// Attributes requested for the authenticated account.
    #[serde(default = "default_attributes")]
    pub attributes: Vec<String>,

    /// Reverse-resolve each token-group SID to a distinguished name.
    #[serde(default)]
    pub resolve_group_names: bool,
}

fn default_port() -> u16 {
    389
}

fn default_ldaps_port() -> u16 {
    636
}

fn default_attributes() -> Vec<String> {
    [
        "sAMAccountName",
        "mail",
        "objectSid",
        "distinguishedName",
        "userAccountControl",
        "displayName",
        "description",
        "cn",
        "givenName",
        "sn",
        "co",
        "mobile",
        "company",
        "thumbnailPhoto",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl DirectoryConfig {
    /// Create a config with required fields and default ports/attributes.
    pub fn new(
        host: impl Into<String>,
        domain: impl Into<String>,
        search_base: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            ldaps_port: default_ldaps_port(),
            use_ldaps: false,
            domain: domain.into(),
            search_base: search_base.into(),
            attributes: default_attributes(),
            resolve_group_names: false,
        }
    }

    /// Enable the encrypted transport.
    #[must_use]
    pub fn with_ldaps(mut self) -> Self {
        self.use_ldaps = true;
        self
    }

    /// Replace the requested attribute list.
    pub fn with_attributes<I, S>(mut self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Reverse-resolve token-group SIDs to distinguished names.
    #[must_use]
    pub fn with_group_names(mut self) -> Self {
        self.resolve_group_names = true;
        self
    }

    /// Endpoint URI for the configured transport and port pair.
    #[must_use]
    pub fn endpoint_url(&self) -> String {
        if self.use_ldaps {
            format!("ldaps://{}:{}", self.host, self.ldaps_port)
        } else {
            format!("ldap://{}:{}", self.host, self.port)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(DirectoryError::Config("host is required".to_string()));
        }
        if self.domain.is_empty() {
            return Err(DirectoryError::Config("domain is required".to_string()));
        }
        if self.search_base.is_empty() {
            return Err(DirectoryError::Config(
                "search_base is required".to_string(),
            ));
        }
        Ok(())
    }
}
