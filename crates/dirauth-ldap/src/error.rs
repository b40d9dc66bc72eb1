use dirauth_types::SidError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Directory transport error: {0}")]
    Transport(String),

    #[error("Directory search failed: {message}")]
    Search {
        message: String,
        diagnostic: Option<String>,
    },

    #[error(transparent)]
    MalformedSid(#[from] SidError),
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

/// Split an `ldap3` error into an operator-facing message and the
/// server's diagnostic text, when one was returned.
pub(crate) fn describe_ldap_error(err: ldap3::LdapError) -> (String, Option<String>) {
    match err {
        ldap3::LdapError::LdapResult { result } => {
            let diagnostic = if result.text.is_empty() {
                None
            } else {
                Some(result.text)
            };
            (format!("LDAP result code {}", result.rc), diagnostic)
        }
        other => (other.to_string(), None),
    }
}

impl From<ldap3::LdapError> for DirectoryError {
    fn from(err: ldap3::LdapError) -> Self {
        match err {
            ldap3::LdapError::LdapResult { .. } => {
                let (message, diagnostic) = describe_ldap_error(err);
                DirectoryError::Search {
                    message,
                    diagnostic,
                }
            }
            other => DirectoryError::Transport(other.to_string()),
        }
    }
}
