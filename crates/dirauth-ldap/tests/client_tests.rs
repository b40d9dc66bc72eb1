//! Integration tests for the directory authentication client surface.

use dirauth_ldap::{
    is_account_enabled, is_flag_set, AccountControl, BindOutcome, DirectoryConfig,
    ResolvedGroup, SecurityIdentifier,
};

#[test]
fn test_config_endpoint_selection() {
    let config = DirectoryConfig::new("ldap.example.com", "EXAMPLE", "dc=example,dc=com");
    assert_eq!(config.endpoint_url(), "ldap://ldap.example.com:389");

    let secure = config.with_ldaps();
    assert_eq!(secure.endpoint_url(), "ldaps://ldap.example.com:636");
}

#[test]
fn test_sid_decoding_through_public_surface() {
    let sid = SecurityIdentifier {
        revision: 1,
        identifier_authority: 5,
        sub_authorities: vec![21, 1, 2, 3],
    };
    let decoded = SecurityIdentifier::parse(&sid.to_bytes()).unwrap();
    assert_eq!(decoded.to_string(), "S-1-5-21-1-2-3");
    assert!(SecurityIdentifier::parse(&[1, 2, 3]).is_err());
}

#[test]
fn test_account_control_predicates() {
    assert!(is_flag_set(546, AccountControl::PasswdNotRequired));
    assert!(!is_flag_set(514, AccountControl::PasswdNotRequired));
    assert_eq!(is_account_enabled(Some(512)), Some(true));
    assert_eq!(is_account_enabled(Some(514)), Some(false));
    assert_eq!(is_account_enabled(None), None);
}

#[test]
fn test_bind_outcome_serializes_for_operator_tooling() {
    let outcome = BindOutcome::failure("LDAP result code 49", Some("80090308".to_string()));
    let json = serde_json::to_string(&outcome).unwrap();
    assert!(json.contains("\"authenticated\":false"));
    assert!(json.contains("80090308"));
}

#[test]
fn test_resolved_group_serializes_as_sid_list() {
    let groups = vec![
        ResolvedGroup {
            sid: "S-1-5-21-1-2-512".parse().unwrap(),
            dn: Some("CN=Admins,DC=example,DC=com".to_string()),
        },
        ResolvedGroup {
            sid: "S-1-5-21-1-2-513".parse().unwrap(),
            dn: None,
        },
    ];
    let json = serde_json::to_string(&groups).unwrap();
    assert!(json.contains("\"revision\":1"));
    assert!(json.contains("CN=Admins,DC=example,DC=com"));
}
