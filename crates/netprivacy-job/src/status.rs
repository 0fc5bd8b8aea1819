//! One-line summary of what the job will do, for display before and while
//! it runs.

use netprivacy_core::{Ipv6Mode, MacPolicy, PolicyConfig, VendorRegistry};

pub fn status_text(policy: &PolicyConfig, registry: &VendorRegistry) -> String {
    let mut status = match policy.mac_policy {
        MacPolicy::Disabled => "MAC spoofing disabled".to_string(),
        MacPolicy::Random => "Random MAC address".to_string(),
        MacPolicy::VendorRandom => match registry.get(&policy.vendor_id) {
            Some(v) => format!("Vendor-random MAC ({})", v.display_name),
            None => format!(
                "Vendor-random MAC (unknown vendor {}, prefix {})",
                policy.vendor_id,
                registry.lookup(&policy.vendor_id)
            ),
        },
        MacPolicy::Fixed => format!("Fixed MAC: {}", policy.fixed_mac_address),
    };

    match policy.ipv6_mode {
        Ipv6Mode::Unchanged => {}
        Ipv6Mode::PrivacyEnabled => status.push_str("; IPv6 privacy enabled"),
        Ipv6Mode::Disabled => status.push_str("; IPv6 disabled"),
    }
    status
}
