//! Core value types for directory authentication.
//!
//! Pure, dependency-light building blocks shared by the LDAP client:
//! the binary security-identifier codec and the `userAccountControl`
//! flag set with its tri-state account predicates.

pub mod account_control;
pub mod error;
pub mod sid;

pub use account_control::{is_account_disabled, is_account_enabled, is_flag_set, AccountControl};
pub use error::{Result, SidError};
pub use sid::SecurityIdentifier;
