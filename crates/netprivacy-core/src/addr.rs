//! Hardware address primitives (panic-free parsing).
//!
//! Parsing rules:
//! - Octets are exactly two hex digits, separated by `:`.
//! - Input case is accepted either way; output is always upper-case.
//! - Malformed input is reported as `NetPrivacyError::InvalidInput`.

use std::fmt;
use std::str::FromStr;

use crate::error::{NetPrivacyError, Result};

/// A 48-bit hardware address, e.g. `AA:BB:CC:DD:EE:FF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddr([u8; 6]);

/// Organizationally Unique Identifier: the first three octets of a [`MacAddr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Oui([u8; 3]);

/// Multicast bit of the first octet.
pub const MULTICAST_BIT: u8 = 0x01;
/// Locally-administered bit of the first octet.
pub const LOCAL_ADMIN_BIT: u8 = 0x02;

impl MacAddr {
    pub const fn new(bytes: [u8; 6]) -> Self {
        Self(bytes)
    }

    /// Join a prefix and a device-specific suffix.
    pub fn from_parts(oui: Oui, suffix: [u8; 3]) -> Self {
        let [a, b, c] = oui.0;
        let [d, e, f] = suffix;
        Self([a, b, c, d, e, f])
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    pub fn oui(&self) -> Oui {
        let [a, b, c, ..] = self.0;
        Oui([a, b, c])
    }

    pub fn is_unicast(&self) -> bool {
        self.0[0] & MULTICAST_BIT == 0
    }

    pub fn is_locally_administered(&self) -> bool {
        self.0[0] & LOCAL_ADMIN_BIT != 0
    }
}

impl Oui {
    /// Generic locally-administered unicast prefix used when a vendor is unknown.
    pub const LOCAL_FALLBACK: Oui = Oui([0x02, 0x00, 0x00]);

    pub const fn new(bytes: [u8; 3]) -> Self {
        Self(bytes)
    }

    pub fn octets(&self) -> [u8; 3] {
        self.0
    }
}

impl FromStr for MacAddr {
    type Err = NetPrivacyError;

    fn from_str(s: &str) -> Result<Self> {
        let mut out = [0u8; 6];
        parse_octets(s, &mut out).map_err(|why| {
            NetPrivacyError::InvalidInput(format!("hardware address {s:?}: {why}"))
        })?;
        Ok(Self(out))
    }
}

impl FromStr for Oui {
    type Err = NetPrivacyError;

    fn from_str(s: &str) -> Result<Self> {
        let mut out = [0u8; 3];
        parse_octets(s, &mut out)
            .map_err(|why| NetPrivacyError::InvalidInput(format!("OUI {s:?}: {why}")))?;
        Ok(Self(out))
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_octets(f, &self.0)
    }
}

impl fmt::Display for Oui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_octets(f, &self.0)
    }
}

fn write_octets(f: &mut fmt::Formatter<'_>, octets: &[u8]) -> fmt::Result {
    for (i, b) in octets.iter().enumerate() {
        if i > 0 {
            f.write_str(":")?;
        }
        write!(f, "{b:02X}")?;
    }
    Ok(())
}

/// Fill `out` from a colon-separated hex string with exactly `out.len()` octets.
fn parse_octets(s: &str, out: &mut [u8]) -> std::result::Result<(), &'static str> {
    let mut parts = s.split(':');
    for slot in out.iter_mut() {
        let part = parts.next().ok_or("too few octets")?;
        if part.len() != 2 || !part.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Err("octets must be two hex digits");
        }
        *slot = u8::from_str_radix(part, 16).map_err(|_| "octets must be two hex digits")?;
    }
    if parts.next().is_some() {
        return Err("too many octets");
    }
    Ok(())
}
