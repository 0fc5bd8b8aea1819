//! Turns a loaded [`JobConfig`] into the runtime pieces of one install run.
//!
//! The vendor registry is built here exactly once (defaults + validated
//! overrides) and shared read-only from then on.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use netprivacy_core::generate;
use netprivacy_core::{MacAddr, PolicyConfig, VendorRegistry};

use crate::config::JobConfig;
use crate::job::NetPrivacyJob;

pub struct JobSetup {
    registry: Arc<VendorRegistry>,
    policy: PolicyConfig,
    target_root: Option<PathBuf>,
}

impl JobSetup {
    pub fn new(cfg: JobConfig) -> Self {
        let registry = VendorRegistry::with_defaults().merge(&cfg.custom_vendors);
        tracing::debug!(
            vendors = registry.len(),
            overrides = cfg.custom_vendors.len(),
            "vendor registry ready"
        );
        let policy = PolicyConfig::resolve(&cfg.selection, &registry);

        Self {
            registry: Arc::new(registry),
            policy,
            target_root: cfg.target_root,
        }
    }

    pub fn registry(&self) -> Arc<VendorRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn target_root(&self) -> Option<&Path> {
        self.target_root.as_deref()
    }

    /// A fresh job over the resolved policy.
    pub fn job(&self) -> NetPrivacyJob {
        NetPrivacyJob::new(self.policy.clone(), self.registry())
    }

    /// Advisory sample address for the current selection.
    pub fn preview(&self) -> Option<MacAddr> {
        let oui = self.registry.lookup(&self.policy.vendor_id);
        generate::preview(self.policy.mac_policy, oui)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config;
    use netprivacy_core::MacPolicy;

    #[test]
    fn overrides_feed_resolution() {
        let cfg = config::load_from_str(
            r#"
version: 1
selection:
  mac_policy: vendor_random
  vendor: acme
custom_vendors:
  - { id: acme, name: "Acme Corp", oui: "12:34:56" }
"#,
        )
        .unwrap();
        let setup = JobSetup::new(cfg);
        assert_eq!(setup.policy().mac_policy, MacPolicy::VendorRandom);
        assert_eq!(setup.registry().lookup("acme").to_string(), "12:34:56");
        assert!(setup.preview().unwrap().to_string().starts_with("12:34:56:"));
        assert_eq!(setup.job().status_text(), "Vendor-random MAC (Acme Corp)");
    }

    #[test]
    fn no_preview_for_fixed() {
        let cfg = config::load_from_str("version: 1\nselection: { mac_policy: 3, mac_address: 'AA:BB:CC:DD:EE:FF' }\n").unwrap();
        assert!(JobSetup::new(cfg).preview().is_none());
    }
}
