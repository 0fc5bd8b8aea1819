//! Hardware address generation.
//!
//! The RNG is a parameter so the job and tests decide where randomness comes
//! from. [`preview`] uses the thread RNG and is advisory only: what the target
//! system actually uses is decided by the written configuration.

use rand::Rng;

use crate::addr::{MacAddr, Oui, LOCAL_ADMIN_BIT, MULTICAST_BIT};
use crate::policy::MacPolicy;

/// Draw an address for `policy`.
///
/// `Disabled` and `Fixed` have nothing to generate and return `None`.
/// `vendor_oui` is only consulted for `VendorRandom`.
pub fn generate<R: Rng>(policy: MacPolicy, vendor_oui: Oui, rng: &mut R) -> Option<MacAddr> {
    let prefix = match policy {
        MacPolicy::Random => random_local_oui(rng),
        MacPolicy::VendorRandom => vendor_oui,
        MacPolicy::Disabled | MacPolicy::Fixed => return None,
    };

    let mut suffix = [0u8; 3];
    rng.fill(&mut suffix);
    Some(MacAddr::from_parts(prefix, suffix))
}

/// Non-committing sample shown to the user before the job runs.
pub fn preview(policy: MacPolicy, vendor_oui: Oui) -> Option<MacAddr> {
    generate(policy, vendor_oui, &mut rand::thread_rng())
}

/// Random unicast, locally-administered prefix.
fn random_local_oui<R: Rng>(rng: &mut R) -> Oui {
    let mut bytes = [0u8; 3];
    rng.fill(&mut bytes);
    bytes[0] = (bytes[0] & !MULTICAST_BIT) | LOCAL_ADMIN_BIT;
    Oui::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn nothing_to_generate_for_disabled_or_fixed() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(generate(MacPolicy::Disabled, Oui::LOCAL_FALLBACK, &mut rng).is_none());
        assert!(generate(MacPolicy::Fixed, Oui::LOCAL_FALLBACK, &mut rng).is_none());
    }

    #[test]
    fn vendor_prefix_is_verbatim() {
        let mut rng = StdRng::seed_from_u64(7);
        let apple = Oui::new([0xA4, 0x83, 0xE7]);
        let mac = generate(MacPolicy::VendorRandom, apple, &mut rng).unwrap();
        assert_eq!(mac.oui(), apple);
        assert!(mac.to_string().starts_with("A4:83:E7:"));
    }

    #[test]
    fn random_ignores_vendor_prefix() {
        let mut rng = StdRng::seed_from_u64(11);
        let apple = Oui::new([0xA4, 0x83, 0xE7]);
        let mac = generate(MacPolicy::Random, apple, &mut rng).unwrap();
        assert!(mac.is_locally_administered());
        assert!(mac.is_unicast());
    }

    #[test]
    fn same_seed_same_draw() {
        let a = generate(MacPolicy::Random, Oui::LOCAL_FALLBACK, &mut StdRng::seed_from_u64(3));
        let b = generate(MacPolicy::Random, Oui::LOCAL_FALLBACK, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }
}
