//! The `userAccountControl` flag set.
//!
//! Active-Directory-style servers expose account status as a 32-bit bit
//! field. The raw value arrives as a decimal string attribute; callers
//! parse it and query it through the predicates below. The attribute is
//! constructed server-side and may legitimately be absent, so the
//! enabled/disabled predicates are tri-state: `None` means the attribute
//! was never resolved, not that the account is enabled or disabled.

/// Named bits of the `userAccountControl` attribute.
///
/// Values are cumulative; a typical enabled user account is 512
/// (`NormalAccount`) and the same account disabled is 514
/// (`NormalAccount | AccountDisable`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AccountControl {
    /// The logon script is executed.
    Script = 0x0001,
    /// The user account is disabled.
    AccountDisable = 0x0002,
    /// The home directory is required.
    HomedirRequired = 0x0008,
    /// The account is currently locked out.
    Lockout = 0x0010,
    /// No password is required.
    PasswdNotRequired = 0x0020,
    /// The user cannot change the password.
    PasswdCantChange = 0x0040,
    /// The user can send an encrypted password.
    EncryptedTextPasswordAllowed = 0x0080,
    /// Local account for a user whose primary account is in another domain.
    TempDuplicateAccount = 0x0100,
    /// Default account type representing a typical user.
    NormalAccount = 0x0200,
    /// Permit-to-trust account for a domain that trusts other domains.
    InterdomainTrustAccount = 0x0800,
    /// Computer account for a domain member workstation or server.
    WorkstationTrustAccount = 0x1000,
    /// Computer account for a backup domain controller.
    ServerTrustAccount = 0x2000,
    /// The password on this account never expires.
    DontExpirePassword = 0x0001_0000,
    /// MNS logon account.
    MnsLogonAccount = 0x0002_0000,
    /// The user must log on with a smart card.
    SmartcardRequired = 0x0004_0000,
    /// The service account is trusted for Kerberos delegation.
    TrustedForDelegation = 0x0008_0000,
    /// The security context of the user is never delegated.
    NotDelegated = 0x0010_0000,
    /// Restrict keys to DES encryption types.
    UseDesKeyOnly = 0x0020_0000,
    /// Kerberos pre-authentication is not required for logon.
    DontRequirePreauth = 0x0040_0000,
    /// The user password has expired.
    PasswordExpired = 0x0080_0000,
    /// The account is enabled for protocol-transition delegation.
    TrustedToAuthForDelegation = 0x0100_0000,
    /// The account is a read-only domain controller.
    PartialSecretsAccount = 0x0400_0000,
}

impl AccountControl {
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Bitwise AND equality test for one named flag.
pub fn is_flag_set(raw: u32, flag: AccountControl) -> bool {
    raw & flag.bits() == flag.bits()
}

/// Whether the account is disabled; `None` when the attribute is unknown.
pub fn is_account_disabled(raw: Option<u32>) -> Option<bool> {
    raw.map(|value| is_flag_set(value, AccountControl::AccountDisable))
}

/// Whether the account is enabled.
///
/// Defined as the exact complement of [`is_account_disabled`]; there is
/// deliberately no second bit test that could drift out of sync.
pub fn is_account_enabled(raw: Option<u32>) -> Option<bool> {
    is_account_disabled(raw).map(|disabled| !disabled)
}
