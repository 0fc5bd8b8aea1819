#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use netprivacy_core::{
    Ipv6Mode, MacPolicy, PolicyConfig, PolicyValue, Unrecognized, VendorRegistry,
};
use netprivacy_job::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
selection:
  mac_policy: 1
  ipv6_mod: 2 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn relative_target_root_is_rejected() {
    let err = config::load_from_str("version: 1\ntarget_root: mnt/target\n").expect_err("must fail");
    assert_eq!(err.code().as_str(), "CONFIG_ERROR");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.selection.mac_policy, PolicyValue::Ordinal(0));
    assert!(cfg.custom_vendors.is_empty());
    assert!(cfg.target_root.is_none());
}

#[test]
fn ordinals_and_names_both_resolve() {
    let by_ordinal = config::load_from_str(
        "version: 1\nselection: { mac_policy: 2, vendor: apple, ipv6_mode: 1 }\n",
    )
    .unwrap();
    let by_name = config::load_from_str(
        "version: 1\nselection: { mac_policy: vendor_random, vendor: apple, ipv6_mode: privacy_enabled }\n",
    )
    .unwrap();

    let reg = VendorRegistry::with_defaults();
    let a = PolicyConfig::resolve(&by_ordinal.selection, &reg);
    let b = PolicyConfig::resolve(&by_name.selection, &reg);
    assert_eq!(a, b);
    assert_eq!(a.mac_policy, MacPolicy::VendorRandom);
    assert_eq!(a.ipv6_mode, Ipv6Mode::PrivacyEnabled);
}

#[test]
fn out_of_range_ordinals_clamp_instead_of_failing() {
    let cfg = config::load_from_str("version: 1\nselection: { mac_policy: 7, ipv6_mode: -1 }\n").unwrap();
    let p = PolicyConfig::resolve(&cfg.selection, &VendorRegistry::with_defaults());
    assert_eq!(p.mac_policy, MacPolicy::Disabled);
    assert_eq!(p.ipv6_mode, Ipv6Mode::Unchanged);
}

#[test]
fn incomplete_custom_vendor_is_not_fatal() {
    let cfg = config::load_from_str(
        r#"
version: 1
custom_vendors:
  - { id: acme, oui: "12:34:56" }
  - { id: beta, name: "Beta", oui: "AB:CD:EF" }
"#,
    )
    .unwrap();
    let reg = VendorRegistry::with_defaults().merge(&cfg.custom_vendors);
    assert!(reg.get("acme").is_none());
    assert_eq!(reg.lookup("beta").to_string(), "AB:CD:EF");
}

#[test]
fn misspelled_custom_vendor_key_skips_only_that_entry() {
    let cfg = config::load_from_str(
        r#"
version: 1
custom_vendors:
  - { id: acme, nmae: "Acme", oui: "12:34:56" }
  - { id: beta, name: Beta, oui: "AB:CD:EF" }
"#,
    )
    .expect("a bad vendor entry must not fail the config");
    assert_eq!(cfg.custom_vendors.len(), 2);
    let reg = VendorRegistry::with_defaults().merge(&cfg.custom_vendors);
    assert!(reg.get("acme").is_none());
    assert_eq!(reg.lookup("beta").to_string(), "AB:CD:EF");
}

#[test]
fn unrepresentable_policy_values_clamp() {
    let cfg = config::load_from_str(
        "version: 1\nselection: { mac_policy: 18446744073709551615, ipv6_mode: 1.5 }\n",
    )
    .expect("odd policy values must not fail the config");
    assert_eq!(cfg.selection.mac_policy, PolicyValue::Other(Unrecognized));
    let p = PolicyConfig::resolve(&cfg.selection, &VendorRegistry::with_defaults());
    assert_eq!(p.mac_policy, MacPolicy::Disabled);
    assert_eq!(p.ipv6_mode, Ipv6Mode::Unchanged);
}
