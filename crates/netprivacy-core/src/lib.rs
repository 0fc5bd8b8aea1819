//! netprivacy core: policy types, hardware addresses, vendor registry, and
//! address generation.
//!
//! This crate carries no filesystem or CLI dependencies so the selection page
//! (preview addresses, vendor list) and the install job share one definition
//! of every policy rule.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `NetPrivacyError`/`Result` so an installer
//! never crashes on malformed selections or configuration.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod addr;
pub mod error;
pub mod generate;
pub mod policy;
pub mod vendor;

pub use addr::{MacAddr, Oui};
/// Shared result type.
pub use error::{ErrorCode, NetPrivacyError, Result};
pub use policy::{Ipv6Mode, MacPolicy, PolicyConfig, PolicyValue, Selection, Unrecognized};
pub use vendor::{VendorEntry, VendorOverride, VendorRegistry};
