//! Top-level facade crate for netprivacy.
//!
//! Re-exports the core types and the install job so users can depend on a single crate.

pub mod core {
    pub use netprivacy_core::*;
}

pub mod job {
    pub use netprivacy_job::*;
}
