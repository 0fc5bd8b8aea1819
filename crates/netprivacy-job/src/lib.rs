//! netprivacy install job library entry.
//!
//! This crate wires the config loader, vendor registry, config emitters, and
//! file writer into the job the installer runs against the target root. It is
//! consumed by the binary (`main.rs`) and by integration tests.

pub mod config;
pub mod emit;
pub mod job;
pub mod setup;
pub mod status;
pub mod writer;

pub use job::{JobOutcome, JobState, JobStep, NetPrivacyJob};
pub use setup::JobSetup;
pub use writer::{ConfigSink, DryRun, TargetFs};
