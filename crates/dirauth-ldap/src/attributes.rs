//! Account attribute search and normalization.

use crate::config::DirectoryConfig;
use crate::connection::{DirectoryEntry, DirectoryOps};
use crate::error::DirectoryError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use dirauth_types::SecurityIdentifier;
use ldap3::{ldap_escape, Scope};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Binary SID attribute, decoded to its canonical string form.
pub const SID_ATTRIBUTE: &str = "objectSid";
/// Binary photo attribute, exposed as base64 text.
pub const PHOTO_ATTRIBUTE: &str = "thumbnailPhoto";
/// Raw account-control bit field, exposed as decimal text.
pub const ACCOUNT_CONTROL_ATTRIBUTE: &str = "userAccountControl";

/// Result of one account attribute search. "Search failed" and "search
/// matched nothing" stay distinct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeOutcome {
    /// An entry was found and its attributes decoded.
    Resolved {
        dn: String,
        attributes: HashMap<String, String>,
    },
    /// The search ran but matched no entry.
    NoSuchAccount,
    /// The search itself could not be executed.
    Failed {
        error: String,
        diagnostic: Option<String>,
    },
}

/// Search for the account by `sAMAccountName` and decode the requested
/// attributes. Never unwinds into the caller: every failure mode is a
/// variant of [`AttributeOutcome`].
pub async fn resolve_attributes<L>(
    link: &mut L,
    config: &DirectoryConfig,
    account: &str,
) -> AttributeOutcome
where
    L: DirectoryOps + ?Sized,
{
    let filter = format!("(sAMAccountName={})", ldap_escape(account));

    let entries = match link
        .search(
            &config.search_base,
            Scope::Subtree,
            &filter,
            &config.attributes,
        )
        .await
    {
        Ok(entries) => entries,
        Err(DirectoryError::Search { message, diagnostic }) => {
            warn!(account = %account, error = %message, "attribute search failed");
            return AttributeOutcome::Failed {
                error: message,
                diagnostic,
            };
        }
        Err(err) => {
            warn!(account = %account, error = %err, "attribute search failed");
            return AttributeOutcome::Failed {
                error: err.to_string(),
                diagnostic: None,
            };
        }
    };

    // More than one match is possible with an overly broad search base;
    // the first entry wins.
    let Some(entry) = entries.into_iter().next() else {
        debug!(account = %account, "no directory entry for account");
        return AttributeOutcome::NoSuchAccount;
    };

    let attributes = normalize(&entry);
    AttributeOutcome::Resolved {
        dn: entry.dn,
        attributes,
    }
}

/// Decode raw attribute values into the consumer-facing string map.
///
/// Only the SID and photo attributes are special-cased, by exact name;
/// every other attribute passes through as opaque text. A malformed SID
/// payload drops that one attribute and leaves the rest intact.
fn normalize(entry: &DirectoryEntry) -> HashMap<String, String> {
    let mut out = HashMap::new();

    for (name, values) in &entry.attrs {
        if name == SID_ATTRIBUTE || name == PHOTO_ATTRIBUTE {
            continue;
        }
        if let Some(value) = values.first() {
            out.insert(name.clone(), value.clone());
        }
    }

    if let Some(raw) = first_binary(entry, SID_ATTRIBUTE) {
        match SecurityIdentifier::parse(&raw) {
            Ok(sid) => {
                out.insert(SID_ATTRIBUTE.to_string(), sid.to_string());
            }
            Err(err) => {
                warn!(attribute = SID_ATTRIBUTE, error = %err, "dropping malformed SID payload");
            }
        }
    }

    if let Some(raw) = first_binary(entry, PHOTO_ATTRIBUTE) {
        out.insert(PHOTO_ATTRIBUTE.to_string(), BASE64.encode(&raw));
    }

    out
}

/// First value of an attribute as bytes. Binary values that happen to
/// be valid UTF-8 are surfaced under `attrs`, so both maps are checked.
fn first_binary(entry: &DirectoryEntry, name: &str) -> Option<Vec<u8>> {
    if let Some(values) = entry.bin_attrs.get(name) {
        return values.first().cloned();
    }
    entry
        .attrs
        .get(name)
        .and_then(|values| values.first())
        .map(|value| value.as_bytes().to_vec())
}
