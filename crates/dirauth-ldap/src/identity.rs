//! Directory identity facade.
//!
//! One call drives the whole linear chain eagerly: connect, bind,
//! attribute search, token-group resolution. The returned value is an
//! immutable snapshot; every failure mode is observable state rather
//! than an unwound error, so a reachable-but-empty directory lookup can
//! never crash the caller.

use crate::attributes::{self, AttributeOutcome, ACCOUNT_CONTROL_ATTRIBUTE};
use crate::bind::{bind_account, BindOutcome};
use crate::config::DirectoryConfig;
use crate::connection::{DirectoryOps, LdapLink};
use crate::groups::{resolve_token_groups, ResolvedGroup};
use dirauth_types::account_control;
use std::collections::HashMap;

/// Where attribute resolution ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStatus {
    /// Resolution never ran: not connected, or the bind failed.
    NotAttempted,
    /// An entry was found and decoded.
    Resolved,
    /// The search ran and matched no account.
    NoSuchAccount,
    /// The search itself failed.
    Failed {
        error: String,
        diagnostic: Option<String>,
    },
}

/// Snapshot of one authentication attempt against the directory.
///
/// The diagnostic accessors are operator-facing; text shown to end
/// users must not distinguish a bad password from a missing account or
/// an unreachable server.
pub struct DirectoryIdentity {
    connected: bool,
    connect_error: Option<String>,
    bind: BindOutcome,
    status: ResolutionStatus,
    distinguished_name: Option<String>,
    attributes: HashMap<String, String>,
    groups: Vec<ResolvedGroup>,
}

impl DirectoryIdentity {
    /// Authenticate the credentials against the configured directory
    /// and, on success, resolve the account's attributes and token
    /// groups. Always returns a snapshot; the connection is released
    /// before returning on every path that opened one.
    pub async fn login(config: &DirectoryConfig, username: &str, password: &str) -> Self {
        match LdapLink::open(config).await {
            Ok(mut link) => {
                let identity = Self::run(&mut link, config, username, password).await;
                link.unbind().await;
                identity
            }
            Err(err) => Self {
                connected: false,
                connect_error: Some(err.to_string()),
                ..Self::empty()
            },
        }
    }

    /// The bind → attributes → groups pipeline over an open link.
    pub(crate) async fn run<L>(
        link: &mut L,
        config: &DirectoryConfig,
        username: &str,
        password: &str,
    ) -> Self
    where
        L: DirectoryOps + ?Sized,
    {
        let mut identity = Self {
            connected: true,
            ..Self::empty()
        };

        identity.bind = bind_account(link, &config.domain, username, password).await;
        if !identity.bind.authenticated {
            return identity;
        }

        match attributes::resolve_attributes(link, config, username).await {
            AttributeOutcome::Resolved { dn, attributes } => {
                identity.status = ResolutionStatus::Resolved;
                identity.distinguished_name = Some(dn);
                identity.attributes = attributes;
            }
            AttributeOutcome::NoSuchAccount => {
                identity.status = ResolutionStatus::NoSuchAccount;
            }
            AttributeOutcome::Failed { error, diagnostic } => {
                identity.status = ResolutionStatus::Failed { error, diagnostic };
            }
        }

        identity.groups = resolve_token_groups(
            link,
            config,
            identity.distinguished_name.as_deref(),
            config.resolve_group_names,
        )
        .await;

        identity
    }

    fn empty() -> Self {
        Self {
            connected: false,
            connect_error: None,
            bind: BindOutcome::default(),
            status: ResolutionStatus::NotAttempted,
            distinguished_name: None,
            attributes: HashMap::new(),
            groups: Vec::new(),
        }
    }

    /// Whether a connection handle was constructed. This does not prove
    /// the server was reachable; see [`LdapLink::open`].
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn is_authenticated(&self) -> bool {
        self.bind.authenticated
    }

    /// Operator-facing error text from the connect or bind stage.
    pub fn bind_error(&self) -> Option<&str> {
        self.bind
            .error
            .as_deref()
            .or(self.connect_error.as_deref())
    }

    /// Server diagnostic text from the bind stage, when one was returned.
    pub fn diagnostic(&self) -> Option<&str> {
        self.bind.diagnostic.as_deref()
    }

    pub fn resolution_status(&self) -> &ResolutionStatus {
        &self.status
    }

    /// Normalized attribute map; empty unless resolution succeeded.
    pub fn attributes(&self) -> &HashMap<String, String> {
        &self.attributes
    }

    pub fn distinguished_name(&self) -> Option<&str> {
        self.distinguished_name.as_deref()
    }

    /// Transitive group memberships in server order.
    pub fn groups(&self) -> &[ResolvedGroup] {
        &self.groups
    }

    /// Canonical string form of every group SID, in server order.
    pub fn group_sids(&self) -> Vec<String> {
        self.groups.iter().map(|g| g.sid.to_string()).collect()
    }

    fn account_control(&self) -> Option<u32> {
        self.attributes
            .get(ACCOUNT_CONTROL_ATTRIBUTE)
            .and_then(|value| value.parse().ok())
    }

    /// Tri-state: `None` when the account-control attribute is absent
    /// or unreadable.
    pub fn is_account_disabled(&self) -> Option<bool> {
        account_control::is_account_disabled(self.account_control())
    }

    /// Exact complement of [`DirectoryIdentity::is_account_disabled`].
    pub fn is_account_enabled(&self) -> Option<bool> {
        account_control::is_account_enabled(self.account_control())
    }
}
