//! IPv6 privacy extensions / IPv6 disable.
//!
//! Two files: a sysctl drop-in for the kernel defaults, and a NetworkManager
//! snippet because NetworkManager applies its own per-connection value over
//! the sysctl one for the interfaces it manages.

use std::fmt::Write as _;

use netprivacy_core::{Ipv6Mode, PolicyConfig, Result};

use super::{ConfigEmitter, EmitContext, IniDoc, RenderedFile, GENERATED_BY};
use crate::job::JobStep;

pub const SYSCTL_PATH: &str = "etc/sysctl.d/90-netprivacy-ipv6.conf";
pub const NM_IPV6_PATH: &str = "etc/NetworkManager/conf.d/91-netprivacy-ipv6.conf";

const CONNECTION_SECTION: &str = "connection-netprivacy-ipv6";

/// `use_tempaddr = 2`: generate temporary addresses and prefer them.
const PREFER_TEMPORARY: u8 = 2;

#[derive(Debug, Default)]
pub struct Ipv6PrivacyEmitter;

impl ConfigEmitter for Ipv6PrivacyEmitter {
    fn step(&self) -> JobStep {
        JobStep::Ipv6Config
    }

    fn applies(&self, policy: &PolicyConfig) -> bool {
        policy.ipv6_mode != Ipv6Mode::Unchanged
    }

    fn render(&self, ctx: &mut EmitContext<'_>) -> Result<Vec<RenderedFile>> {
        let mode = ctx.policy.ipv6_mode;
        let (sysctl, nm) = match mode {
            Ipv6Mode::Unchanged => return Ok(Vec::new()),
            Ipv6Mode::PrivacyEnabled => (
                sysctl_doc(mode, &[("all", "use_tempaddr"), ("default", "use_tempaddr")], PREFER_TEMPORARY),
                nm_doc(mode, "ipv6.ip6-privacy", PREFER_TEMPORARY.to_string()),
            ),
            Ipv6Mode::Disabled => (
                sysctl_doc(
                    mode,
                    &[("all", "disable_ipv6"), ("default", "disable_ipv6"), ("lo", "disable_ipv6")],
                    1,
                ),
                nm_doc(mode, "ipv6.method", "disabled".to_string()),
            ),
        };

        Ok(vec![
            RenderedFile::new(SYSCTL_PATH, sysctl),
            RenderedFile::new(NM_IPV6_PATH, nm),
        ])
    }
}

fn sysctl_doc(mode: Ipv6Mode, keys: &[(&str, &str)], value: u8) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {GENERATED_BY}");
    let _ = writeln!(out, "# IPv6 mode: {}", mode.as_str());
    for (iface, key) in keys {
        let _ = writeln!(out, "net.ipv6.conf.{iface}.{key} = {value}");
    }
    out
}

fn nm_doc(mode: Ipv6Mode, key: &str, value: String) -> String {
    let mut doc = IniDoc::new();
    doc.comment(&format!("IPv6 mode: {}", mode.as_str()))
        .section(CONNECTION_SECTION)
        .kv(key, value);
    doc.finish()
}
