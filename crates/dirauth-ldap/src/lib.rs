//! # Directory Authentication Client
//!
//! Authenticates a username/password pair against an
//! Active-Directory-style LDAP server and resolves the account's
//! directory attributes, security identifier, transitive group
//! membership and account-control state for an external identity layer.
//!
//! ## Example
//!
//! ```ignore
//! use dirauth_ldap::{DirectoryConfig, DirectoryIdentity};
//!
//! let config = DirectoryConfig::new("dc01.example.local", "EXAMPLE", "dc=example,dc=local")
//!     .with_ldaps();
//!
//! let identity = DirectoryIdentity::login(&config, "alice", "secret").await;
//! if identity.is_authenticated() {
//!     let sid = identity.attributes().get("objectSid");
//!     let enabled = identity.is_account_enabled();
//! }
//! ```

pub mod attributes;
pub mod bind;
pub mod config;
pub mod connection;
pub mod error;
pub mod groups;
pub mod identity;

pub use attributes::AttributeOutcome;
pub use bind::BindOutcome;
pub use config::DirectoryConfig;
pub use connection::{DirectoryEntry, DirectoryOps, LdapLink};
pub use error::{DirectoryError, Result};
pub use groups::ResolvedGroup;
pub use identity::{DirectoryIdentity, ResolutionStatus};

// Re-export the core value types alongside the client.
pub use dirauth_types::{
    is_account_disabled, is_account_enabled, is_flag_set, AccountControl, SecurityIdentifier,
    SidError,
};
