//! Transitive group membership via the token-groups mechanism.
//!
//! The directory server computes the full transitive closure of group
//! membership itself and returns it as the `tokenGroups` attribute, one
//! binary SID per group. No client-side recursion is needed.

use crate::config::DirectoryConfig;
use crate::connection::DirectoryOps;
use dirauth_types::SecurityIdentifier;
use ldap3::Scope;
use serde::Serialize;
use tracing::{debug, warn};

pub const TOKEN_GROUPS_ATTRIBUTE: &str = "tokenGroups";

/// One transitive group membership, optionally resolved to its entry.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResolvedGroup {
    pub sid: SecurityIdentifier,
    pub dn: Option<String>,
}

/// Read and decode the account's token groups, preserving server order.
///
/// Returns an empty list when the account's distinguished name was
/// never resolved. With `resolve_names`, each SID costs one extra
/// directory read; a failed or empty lookup for one group leaves that
/// group's name absent and the rest intact.
pub async fn resolve_token_groups<L>(
    link: &mut L,
    config: &DirectoryConfig,
    dn: Option<&str>,
    resolve_names: bool,
) -> Vec<ResolvedGroup>
where
    L: DirectoryOps + ?Sized,
{
    let Some(dn) = dn else {
        return Vec::new();
    };

    let attrs = vec![TOKEN_GROUPS_ATTRIBUTE.to_string()];
    let entry = match link
        .read_entry(dn, Scope::Base, "(objectClass=*)", &attrs)
        .await
    {
        Ok(Some(entry)) => entry,
        Ok(None) => {
            debug!(dn = %dn, "token-groups read matched no entry");
            return Vec::new();
        }
        Err(err) => {
            warn!(dn = %dn, error = %err, "token-groups read failed");
            return Vec::new();
        }
    };

    // Values that decode as UTF-8 are surfaced in the text map instead
    // of the binary one.
    let mut raw_values = entry
        .bin_attrs
        .get(TOKEN_GROUPS_ATTRIBUTE)
        .cloned()
        .unwrap_or_default();
    if raw_values.is_empty() {
        if let Some(values) = entry.attrs.get(TOKEN_GROUPS_ATTRIBUTE) {
            raw_values = values.iter().map(|v| v.as_bytes().to_vec()).collect();
        }
    }

    let mut groups = Vec::with_capacity(raw_values.len());
    for raw in &raw_values {
        let sid = match SecurityIdentifier::parse(raw) {
            Ok(sid) => sid,
            Err(err) => {
                warn!(dn = %dn, error = %err, "skipping malformed token-group SID");
                continue;
            }
        };

        let group_dn = if resolve_names {
            lookup_group_dn(link, config, &sid).await
        } else {
            None
        };
        groups.push(ResolvedGroup { sid, dn: group_dn });
    }

    groups
}

/// Reverse SID-to-entry lookup. Active Directory accepts the canonical
/// string form of a SID in an equality filter.
async fn lookup_group_dn<L>(
    link: &mut L,
    config: &DirectoryConfig,
    sid: &SecurityIdentifier,
) -> Option<String>
where
    L: DirectoryOps + ?Sized,
{
    let filter = format!("(objectSid={sid})");
    let attrs = vec!["distinguishedName".to_string()];

    match link
        .read_entry(&config.search_base, Scope::Subtree, &filter, &attrs)
        .await
    {
        Ok(Some(entry)) => Some(entry.dn),
        Ok(None) => {
            debug!(sid = %sid, "no entry for group SID");
            None
        }
        Err(err) => {
            warn!(sid = %sid, error = %err, "group SID lookup failed");
            None
        }
    }
}
