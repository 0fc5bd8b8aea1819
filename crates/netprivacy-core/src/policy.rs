//! Policy axes and the ingress resolver.
//!
//! Raw selections arrive as ordinals (what the selection page persists) or as
//! names (hand-written configs). Both are clamped here, once, so nothing past
//! this module ever sees an out-of-range variant.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use crate::vendor::VendorRegistry;

/// How the hardware address of managed interfaces is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MacPolicy {
    #[default]
    Disabled,
    Random,
    VendorRandom,
    Fixed,
}

/// IPv6 addressing behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Ipv6Mode {
    #[default]
    Unchanged,
    PrivacyEnabled,
    Disabled,
}

impl MacPolicy {
    /// Ordinals outside `0..=3` clamp to `Disabled`.
    pub fn from_ordinal(raw: i64) -> Self {
        match raw {
            1 => MacPolicy::Random,
            2 => MacPolicy::VendorRandom,
            3 => MacPolicy::Fixed,
            _ => MacPolicy::Disabled,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "disabled" => Some(MacPolicy::Disabled),
            "random" => Some(MacPolicy::Random),
            "vendor_random" | "vendor-random" => Some(MacPolicy::VendorRandom),
            "fixed" => Some(MacPolicy::Fixed),
            _ => None,
        }
    }

    pub fn ordinal(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MacPolicy::Disabled => "disabled",
            MacPolicy::Random => "random",
            MacPolicy::VendorRandom => "vendor_random",
            MacPolicy::Fixed => "fixed",
        }
    }
}

impl Ipv6Mode {
    /// Ordinals outside `0..=2` clamp to `Unchanged`.
    pub fn from_ordinal(raw: i64) -> Self {
        match raw {
            1 => Ipv6Mode::PrivacyEnabled,
            2 => Ipv6Mode::Disabled,
            _ => Ipv6Mode::Unchanged,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "unchanged" => Some(Ipv6Mode::Unchanged),
            "privacy_enabled" | "privacy-enabled" | "privacy" => Some(Ipv6Mode::PrivacyEnabled),
            "disabled" => Some(Ipv6Mode::Disabled),
            _ => None,
        }
    }

    pub fn ordinal(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ipv6Mode::Unchanged => "unchanged",
            Ipv6Mode::PrivacyEnabled => "privacy_enabled",
            Ipv6Mode::Disabled => "disabled",
        }
    }
}

/// Untrusted policy value: an ordinal, a variant name, or anything else.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PolicyValue {
    Ordinal(i64),
    Name(String),
    /// Floats, integers beyond `i64`, sequences, null. Resolves to the no-op.
    Other(Unrecognized),
}

/// Placeholder for a policy value that is neither an ordinal nor a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unrecognized;

impl<'de> Deserialize<'de> for Unrecognized {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| Unrecognized)
    }
}

impl Default for PolicyValue {
    fn default() -> Self {
        PolicyValue::Ordinal(0)
    }
}

/// Raw user selection, as produced by the selection page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Selection {
    #[serde(default)]
    pub mac_policy: PolicyValue,
    #[serde(default)]
    pub mac_address: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub ipv6_mode: PolicyValue,
}

/// Normalize raw ordinals. Total: never fails.
pub fn normalize(raw_mac_policy: i64, raw_ipv6_mode: i64) -> (MacPolicy, Ipv6Mode) {
    (
        MacPolicy::from_ordinal(raw_mac_policy),
        Ipv6Mode::from_ordinal(raw_ipv6_mode),
    )
}

/// Normalized, read-only job input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PolicyConfig {
    pub mac_policy: MacPolicy,
    /// Only meaningful for [`MacPolicy::Fixed`].
    pub fixed_mac_address: String,
    /// Only meaningful for [`MacPolicy::VendorRandom`].
    pub vendor_id: String,
    pub ipv6_mode: Ipv6Mode,
}

impl PolicyConfig {
    /// Resolve a raw selection against the vendor registry.
    ///
    /// Bad ordinals and names clamp to the no-op variant. An empty vendor id
    /// falls back to the registry's first entry; an unknown one is kept and
    /// only logged, since lookup already falls back to the generic prefix.
    pub fn resolve(selection: &Selection, registry: &VendorRegistry) -> Self {
        let mac_policy = match &selection.mac_policy {
            PolicyValue::Ordinal(n) => MacPolicy::from_ordinal(*n),
            PolicyValue::Name(name) => MacPolicy::from_name(name).unwrap_or_else(|| {
                tracing::warn!(value = %name, "unknown mac_policy; using disabled");
                MacPolicy::Disabled
            }),
            PolicyValue::Other(_) => {
                tracing::warn!("unrecognized mac_policy value; using disabled");
                MacPolicy::Disabled
            }
        };
        let ipv6_mode = match &selection.ipv6_mode {
            PolicyValue::Ordinal(n) => Ipv6Mode::from_ordinal(*n),
            PolicyValue::Name(name) => Ipv6Mode::from_name(name).unwrap_or_else(|| {
                tracing::warn!(value = %name, "unknown ipv6_mode; using unchanged");
                Ipv6Mode::Unchanged
            }),
            PolicyValue::Other(_) => {
                tracing::warn!("unrecognized ipv6_mode value; using unchanged");
                Ipv6Mode::Unchanged
            }
        };

        let mut vendor_id = selection.vendor.trim().to_string();
        if vendor_id.is_empty() {
            vendor_id = registry.default_vendor_id().unwrap_or_default().to_string();
        }
        if mac_policy == MacPolicy::VendorRandom && registry.get(&vendor_id).is_none() {
            tracing::warn!(vendor = %vendor_id, "unknown vendor; generic local prefix will be used");
        }

        Self {
            mac_policy,
            fixed_mac_address: selection.mac_address.trim().to_ascii_uppercase(),
            vendor_id,
            ipv6_mode,
        }
    }

    /// `false` when neither axis asks for any change.
    pub fn requires_job(&self) -> bool {
        self.mac_policy != MacPolicy::Disabled || self.ipv6_mode != Ipv6Mode::Unchanged
    }
}
