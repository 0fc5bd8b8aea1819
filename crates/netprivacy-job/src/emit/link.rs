//! systemd `.link` override.
//!
//! udev applies `.link` files before any network manager starts, so the
//! address policy is in effect from the first moment an interface exists.
//! The `10-` prefix in `/etc/systemd/network` is reserved for local
//! overrides and sorts ahead of the distribution's `99-default.link`. Only the
//! first matching file applies, so the default naming policy is restated to
//! keep interface names unchanged.
//!
//! The rule matches every Ethernet and Wi-Fi interface at once. For the fixed
//! and vendor-random policies that means one address for all of them: a
//! machine with both an Ethernet and a Wi-Fi adapter gets the same MAC on both.

use netprivacy_core::generate::generate;
use netprivacy_core::{MacPolicy, PolicyConfig, Result};

use super::{describe_vendor, fixed_address, ConfigEmitter, EmitContext, IniDoc, RenderedFile};
use crate::job::JobStep;

pub const LINK_PATH: &str = "etc/systemd/network/10-netprivacy.link";

const MATCH_TYPES: &str = "ether wlan";
const NAME_POLICY: &str = "keep kernel database onboard slot path";
const ALT_NAMES_POLICY: &str = "database onboard slot path";
const SHARED_ADDRESS_NOTE: &str = "Every matched ethernet and wlan interface receives this same address.";

#[derive(Debug, Default)]
pub struct LinkOverrideEmitter;

impl ConfigEmitter for LinkOverrideEmitter {
    fn step(&self) -> JobStep {
        JobStep::LinkConfig
    }

    fn applies(&self, policy: &PolicyConfig) -> bool {
        policy.mac_policy != MacPolicy::Disabled
    }

    fn render(&self, ctx: &mut EmitContext<'_>) -> Result<Vec<RenderedFile>> {
        let policy = ctx.policy;
        let mut doc = IniDoc::new();

        match policy.mac_policy {
            MacPolicy::Disabled => return Ok(Vec::new()),
            MacPolicy::Random => {
                doc.comment("MAC policy: random, re-drawn by udev on every boot");
                link_header(&mut doc).kv("MACAddressPolicy", "random");
            }
            MacPolicy::VendorRandom => {
                // .link has no vendor-prefix mode: persist the install-time draw.
                let oui = ctx.registry.lookup(&policy.vendor_id);
                let mut rng = &mut *ctx.rng;
                let Some(mac) = generate(MacPolicy::VendorRandom, oui, &mut rng) else {
                    return Ok(Vec::new());
                };
                tracing::debug!(%mac, "persisting install-time vendor address for link override");
                doc.comment(&format!("MAC policy: {}", describe_vendor(policy, ctx.registry)))
                    .comment("This address was drawn at install time and stays fixed until the next install.")
                    .comment(SHARED_ADDRESS_NOTE);
                link_header(&mut doc)
                    .kv("MACAddressPolicy", "none")
                    .kv("MACAddress", mac);
            }
            MacPolicy::Fixed => {
                let mac = fixed_address(policy)?;
                doc.comment("MAC policy: fixed").comment(SHARED_ADDRESS_NOTE);
                link_header(&mut doc)
                    .kv("MACAddressPolicy", "none")
                    .kv("MACAddress", mac);
            }
        }

        Ok(vec![RenderedFile::new(LINK_PATH, doc.finish())])
    }
}

fn link_header(doc: &mut IniDoc) -> &mut IniDoc {
    doc.section("Match")
        .kv("Type", MATCH_TYPES)
        .section("Link")
        .kv("NamePolicy", NAME_POLICY)
        .kv("AlternativeNamesPolicy", ALT_NAMES_POLICY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::testing::render;
    use netprivacy_core::MacAddr;

    fn policy(mac_policy: MacPolicy) -> PolicyConfig {
        PolicyConfig {
            mac_policy,
            ..PolicyConfig::default()
        }
    }

    fn value_of<'a>(body: &'a str, key: &str) -> Option<&'a str> {
        body.lines()
            .find_map(|l| l.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
    }

    #[test]
    fn keeps_default_naming() {
        let files = render(&LinkOverrideEmitter, &policy(MacPolicy::Random)).unwrap();
        let body = &files[0].contents;
        assert_eq!(value_of(body, "NamePolicy"), Some(NAME_POLICY));
        assert_eq!(value_of(body, "MACAddressPolicy"), Some("random"));
        assert_eq!(value_of(body, "MACAddress"), None);
        assert!(body.contains("[Match]\nType=ether wlan\n"));
    }

    #[test]
    fn vendor_random_persists_prefixed_draw() {
        let mut p = policy(MacPolicy::VendorRandom);
        p.vendor_id = "apple".into();
        let files = render(&LinkOverrideEmitter, &p).unwrap();
        let body = &files[0].contents;
        let mac: MacAddr = value_of(body, "MACAddress").unwrap().parse().unwrap();
        assert_eq!(mac.oui().to_string(), "A4:83:E7");
        assert_eq!(value_of(body, "MACAddressPolicy"), Some("none"));
        assert!(body.contains("fixed until the next install"));
        assert!(body.contains(SHARED_ADDRESS_NOTE));
    }

    #[test]
    fn fixed_embeds_address() {
        let mut p = policy(MacPolicy::Fixed);
        p.fixed_mac_address = "AA:BB:CC:DD:EE:FF".into();
        let files = render(&LinkOverrideEmitter, &p).unwrap();
        assert_eq!(value_of(&files[0].contents, "MACAddress"), Some("AA:BB:CC:DD:EE:FF"));
        assert!(files[0].contents.contains(SHARED_ADDRESS_NOTE));
    }

    #[test]
    fn random_has_no_shared_address_note() {
        let files = render(&LinkOverrideEmitter, &policy(MacPolicy::Random)).unwrap();
        assert!(!files[0].contents.contains(SHARED_ADDRESS_NOTE));
    }
}
