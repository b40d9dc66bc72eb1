//! Credential bind session.

use crate::connection::DirectoryOps;
use serde::Serialize;
use tracing::debug;

/// Outcome of one credential bind. Immutable after creation.
///
/// A rejected bind is data, not an error: the caller observes
/// `authenticated` and reads the operator-facing texts explicitly.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct BindOutcome {
    pub authenticated: bool,
    pub error: Option<String>,
    pub diagnostic: Option<String>,
}

impl BindOutcome {
    pub fn success() -> Self {
        Self {
            authenticated: true,
            error: None,
            diagnostic: None,
        }
    }

    pub fn failure(error: impl Into<String>, diagnostic: Option<String>) -> Self {
        Self {
            authenticated: false,
            error: Some(error.into()),
            diagnostic,
        }
    }
}

/// Down-level logon name: `DOMAIN\username`.
pub fn logon_principal(domain: &str, username: &str) -> String {
    format!("{domain}\\{username}")
}

/// Bind the supplied credentials over an established connection.
///
/// Empty credentials are refused locally: a simple bind with an empty
/// password is an unauthenticated bind, which directory servers accept
/// for any principal.
pub async fn bind_account<L>(
    link: &mut L,
    domain: &str,
    username: &str,
    password: &str,
) -> BindOutcome
where
    L: DirectoryOps + ?Sized,
{
    if username.is_empty() || password.is_empty() {
        return BindOutcome::failure("empty credentials refused", None);
    }

    let principal = logon_principal(domain, username);
    debug!(principal = %principal, "binding to directory");

    let outcome = link.simple_bind(&principal, password).await;
    if !outcome.authenticated {
        debug!(principal = %principal, error = ?outcome.error, "bind rejected");
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::MockDirectoryOps;

    #[test]
    fn test_logon_principal() {
        assert_eq!(logon_principal("EXAMPLE", "alice"), "EXAMPLE\\alice");
    }

    #[tokio::test]
    async fn test_bind_builds_down_level_principal() {
        let mut link = MockDirectoryOps::new();
        link.expect_simple_bind()
            .withf(|principal, password| principal == "EXAMPLE\\alice" && password == "secret")
            .times(1)
            .returning(|_, _| BindOutcome::success());

        let outcome = bind_account(&mut link, "EXAMPLE", "alice", "secret").await;
        assert!(outcome.authenticated);
    }

    #[tokio::test]
    async fn test_empty_password_never_reaches_the_wire() {
        let mut link = MockDirectoryOps::new();
        link.expect_simple_bind().never();

        let outcome = bind_account(&mut link, "EXAMPLE", "alice", "").await;
        assert!(!outcome.authenticated);
        assert!(outcome.error.is_some());
    }

    #[tokio::test]
    async fn test_failed_bind_carries_diagnostics() {
        let mut link = MockDirectoryOps::new();
        link.expect_simple_bind().returning(|_, _| {
            BindOutcome::failure(
                "LDAP result code 49",
                Some("80090308: LdapErr: DSID-0C09044E".to_string()),
            )
        });

        let outcome = bind_account(&mut link, "EXAMPLE", "alice", "wrong").await;
        assert!(!outcome.authenticated);
        assert_eq!(outcome.error.as_deref(), Some("LDAP result code 49"));
        assert!(outcome.diagnostic.as_deref().unwrap().contains("80090308"));
    }
}
