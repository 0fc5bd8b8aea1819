//! Vendor OUI registry.
//!
//! Built once at startup from the built-in table plus validated overrides,
//! then shared read-only. There is no removal and no mutation after build.

use std::borrow::Borrow;

use serde::Deserialize;

use crate::addr::Oui;
use crate::error::{NetPrivacyError, Result};

/// A known hardware vendor and its address prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorEntry {
    pub id: String,
    pub display_name: String,
    pub oui: Oui,
}

impl VendorEntry {
    pub fn new(id: &str, display_name: &str, oui: &str) -> Result<Self> {
        if id.is_empty() {
            return Err(NetPrivacyError::InvalidInput("vendor id must not be empty".into()));
        }
        if display_name.is_empty() {
            return Err(NetPrivacyError::InvalidInput(format!(
                "vendor {id}: name must not be empty"
            )));
        }
        Ok(Self {
            id: id.to_string(),
            display_name: display_name.to_string(),
            oui: oui.parse()?,
        })
    }
}

/// Caller-supplied vendor entry, as read from configuration.
///
/// Every key is optional and unknown keys are ignored, so an incomplete or
/// misspelled entry is skipped with a warning instead of failing the whole
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct VendorOverride {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub oui: Option<String>,
}

impl VendorOverride {
    pub fn new(id: &str, name: &str, oui: &str) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
            oui: Some(oui.into()),
        }
    }

    fn validate(&self) -> Result<VendorEntry> {
        match (&self.id, &self.name, &self.oui) {
            (Some(id), Some(name), Some(oui)) => VendorEntry::new(id, name, oui),
            _ => Err(NetPrivacyError::InvalidInput(
                "vendor entry needs id, name and oui".into(),
            )),
        }
    }
}

const BUILTIN_VENDORS: &[(&str, &str, [u8; 3])] = &[
    ("intel", "Intel Corporation", [0x00, 0x1B, 0x21]),
    ("intel_wifi", "Intel Wi-Fi", [0x7C, 0xB0, 0xC2]),
    ("realtek", "Realtek Semiconductor", [0x00, 0xE0, 0x4C]),
    ("apple", "Apple, Inc.", [0xA4, 0x83, 0xE7]),
    ("samsung", "Samsung Electronics", [0x00, 0x26, 0x37]),
    ("dell", "Dell Inc.", [0x00, 0x14, 0x22]),
    ("hp", "Hewlett-Packard", [0x00, 0x1E, 0x0B]),
    ("lenovo", "Lenovo", [0x00, 0x1A, 0x6B]),
    ("asus", "ASUSTek Computer", [0x00, 0x1D, 0x60]),
    ("qualcomm", "Qualcomm Atheros", [0x00, 0x03, 0x7F]),
    ("broadcom", "Broadcom Inc.", [0x00, 0x10, 0x18]),
    ("mediatek", "MediaTek Inc.", [0x00, 0x0C, 0xE7]),
    ("tp_link", "TP-Link Technologies", [0x54, 0xE6, 0xFC]),
    ("cisco", "Cisco Systems", [0x00, 0x1A, 0xA1]),
    ("netgear", "Netgear Inc.", [0x00, 0x1E, 0x2A]),
    ("huawei", "Huawei Technologies", [0x00, 0xE0, 0xFC]),
    ("xiaomi", "Xiaomi Communications", [0x64, 0xB4, 0x73]),
    ("microsoft", "Microsoft Corporation", [0x00, 0x15, 0x5D]),
    ("vmware", "VMware, Inc.", [0x00, 0x50, 0x56]),
    ("generic", "Generic (Local Admin)", [0x02, 0x00, 0x00]),
];

/// Ordered, id-unique vendor table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRegistry {
    entries: Vec<VendorEntry>,
}

impl VendorRegistry {
    /// Registry seeded with the built-in vendor table.
    pub fn with_defaults() -> Self {
        let entries = BUILTIN_VENDORS
            .iter()
            .map(|(id, name, oui)| VendorEntry {
                id: (*id).to_string(),
                display_name: (*name).to_string(),
                oui: Oui::new(*oui),
            })
            .collect();
        Self { entries }
    }

    /// Registry without any entries. Every lookup falls back.
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Apply overrides: replace by `id` in place, or append.
    ///
    /// Invalid overrides are skipped with a warning.
    pub fn merge<I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator,
        I::Item: Borrow<VendorOverride>,
    {
        for raw in overrides {
            let raw: &VendorOverride = raw.borrow();
            let entry = match raw.validate() {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(
                        id = raw.id.as_deref().unwrap_or(""),
                        error = %e,
                        "skipping invalid custom vendor entry"
                    );
                    continue;
                }
            };
            match self.entries.iter_mut().find(|v| v.id == entry.id) {
                Some(existing) => *existing = entry,
                None => self.entries.push(entry),
            }
        }
        self
    }

    /// Registered prefix for `vendor_id`, or [`Oui::LOCAL_FALLBACK`].
    pub fn lookup(&self, vendor_id: &str) -> Oui {
        self.get(vendor_id)
            .map(|v| v.oui)
            .unwrap_or(Oui::LOCAL_FALLBACK)
    }

    pub fn get(&self, vendor_id: &str) -> Option<&VendorEntry> {
        self.entries.iter().find(|v| v.id == vendor_id)
    }

    /// Id of the first entry; the selection default when none is given.
    pub fn default_vendor_id(&self) -> Option<&str> {
        self.entries.first().map(|v| v.id.as_str())
    }

    pub fn entries(&self) -> &[VendorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for VendorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
