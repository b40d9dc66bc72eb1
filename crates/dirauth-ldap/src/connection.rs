//! Directory transport and low-level search primitives.

use crate::bind::BindOutcome;
use crate::config::DirectoryConfig;
use crate::error::{describe_ldap_error, DirectoryError, Result};
use async_trait::async_trait;
use ldap3::{Ldap, LdapConnAsync, Scope, SearchEntry};
use std::collections::HashMap;
use tracing::{debug, warn};

/// One entry as returned by a directory search: text-valued attributes
/// in `attrs`, raw byte values in `bin_attrs`.
#[derive(Debug, Clone, Default)]
pub struct DirectoryEntry {
    pub dn: String,
    pub attrs: HashMap<String, Vec<String>>,
    pub bin_attrs: HashMap<String, Vec<Vec<u8>>>,
}

impl From<SearchEntry> for DirectoryEntry {
    fn from(entry: SearchEntry) -> Self {
        Self {
            dn: entry.dn,
            attrs: entry.attrs,
            bin_attrs: entry.bin_attrs,
        }
    }
}

/// Low-level operations over one directory connection.
///
/// The production implementation is [`LdapLink`]; tests substitute a
/// mock at this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryOps: Send {
    /// Simple credential bind. A rejected bind is reported in the
    /// outcome, never as an error.
    async fn simple_bind(&mut self, principal: &str, password: &str) -> BindOutcome;

    /// Search returning every matching entry.
    async fn search(
        &mut self,
        base: &str,
        scope: Scope,
        filter: &str,
        attrs: &[String],
    ) -> Result<Vec<DirectoryEntry>>;

    /// Read a single entry; `None` when nothing matches.
    async fn read_entry(
        &mut self,
        base: &str,
        scope: Scope,
        filter: &str,
        attrs: &[String],
    ) -> Result<Option<DirectoryEntry>>;

    /// Release the connection. Best-effort; failures are logged.
    async fn unbind(&mut self);
}

/// Production [`DirectoryOps`] backed by `ldap3`.
///
/// `ldap3` speaks LDAPv3 exclusively and never chases referrals on the
/// client side, so the fixed protocol version and referral policy need
/// no per-connection options.
pub struct LdapLink {
    ldap: Ldap,
    url: String,
}

impl LdapLink {
    /// Construct a handle to the configured endpoint.
    ///
    /// A successful open proves only that the handle exists;
    /// reachability problems surface on the first bind or search.
    pub async fn open(config: &DirectoryConfig) -> Result<Self> {
        config.validate()?;

        let url = config.endpoint_url();
        debug!(url = %url, "opening directory connection");

        let (conn, ldap) = LdapConnAsync::new(&url)
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;
        ldap3::drive!(conn);

        Ok(Self { ldap, url })
    }
}

#[async_trait]
impl DirectoryOps for LdapLink {
    async fn simple_bind(&mut self, principal: &str, password: &str) -> BindOutcome {
        match self
            .ldap
            .simple_bind(principal, password)
            .await
            .and_then(|res| res.success())
        {
            Ok(_) => BindOutcome::success(),
            Err(err) => {
                let (message, diagnostic) = describe_ldap_error(err);
                BindOutcome::failure(message, diagnostic)
            }
        }
    }

    async fn search(
        &mut self,
        base: &str,
        scope: Scope,
        filter: &str,
        attrs: &[String],
    ) -> Result<Vec<DirectoryEntry>> {
        let (entries, _res) = self
            .ldap
            .search(base, scope, filter, attrs.to_vec())
            .await?
            .success()?;

        Ok(entries
            .into_iter()
            .map(SearchEntry::construct)
            .map(DirectoryEntry::from)
            .collect())
    }

    async fn read_entry(
        &mut self,
        base: &str,
        scope: Scope,
        filter: &str,
        attrs: &[String],
    ) -> Result<Option<DirectoryEntry>> {
        let mut entries = self.search(base, scope, filter, attrs).await?;
        if entries.len() > 1 {
            debug!(
                filter = %filter,
                count = entries.len(),
                "read matched multiple entries, using the first"
            );
        }
        Ok(if entries.is_empty() {
            None
        } else {
            Some(entries.remove(0))
        })
    }

    async fn unbind(&mut self) {
        if let Err(err) = self.ldap.unbind().await {
            warn!(url = %self.url, error = %err, "unbind failed");
        }
    }
}
