//! NetworkManager MAC override.
//!
//! Written as a `conf.d` snippet with uniquely named `[connection-*]` and
//! `[device-*]` default sections, so connection profiles keep their own
//! settings and other snippets are not shadowed.
//!
//! Random policies are declarative: NetworkManager draws a fresh address on
//! every activation. Only `Fixed` embeds a concrete address.

use netprivacy_core::{MacPolicy, PolicyConfig, Result};

use super::{describe_vendor, fixed_address, ConfigEmitter, EmitContext, IniDoc, RenderedFile};
use crate::job::JobStep;

pub const MAC_CONF_PATH: &str = "etc/NetworkManager/conf.d/90-netprivacy-mac.conf";

const CONNECTION_SECTION: &str = "connection-netprivacy-mac";
const DEVICE_SECTION: &str = "device-netprivacy-mac";
const LINK_KINDS: [&str; 2] = ["ethernet", "wifi"];

/// Keep the OUI bits, randomize the rest.
const OUI_MASK: &str = "FF:FF:FF:00:00:00";

#[derive(Debug, Default)]
pub struct MacOverrideEmitter;

impl ConfigEmitter for MacOverrideEmitter {
    fn step(&self) -> JobStep {
        JobStep::MacConfig
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
                doc.comment("MAC policy: random, re-drawn on every connection activation");
                scan_randomization(&mut doc);
                doc.section(CONNECTION_SECTION);
                for kind in LINK_KINDS {
                    doc.kv(&format!("{kind}.cloned-mac-address"), "random");
                }
            }
            MacPolicy::VendorRandom => {
                let oui = ctx.registry.lookup(&policy.vendor_id);
                doc.comment(&format!(
                    "MAC policy: {}, re-drawn on every connection activation",
                    describe_vendor(policy, ctx.registry)
                ));
                scan_randomization(&mut doc);
                doc.section(CONNECTION_SECTION);
                for kind in LINK_KINDS {
                    doc.kv(&format!("{kind}.cloned-mac-address"), "random")
                        .kv(
                            &format!("{kind}.generate-mac-address-mask"),
                            format!("{OUI_MASK} {oui}:00:00:00"),
                        );
                }
            }
            MacPolicy::Fixed => {
                let mac = fixed_address(policy)?;
                doc.comment("MAC policy: fixed");
                doc.section(CONNECTION_SECTION);
                for kind in LINK_KINDS {
                    doc.kv(&format!("{kind}.cloned-mac-address"), mac);
                }
            }
        }

        Ok(vec![RenderedFile::new(MAC_CONF_PATH, doc.finish())])
    }
}

fn scan_randomization(doc: &mut IniDoc) {
    doc.section(DEVICE_SECTION)
        .kv("wifi.scan-rand-mac-address", "yes");
}
